//! Run state tracking.

/// Per-run quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QuotaLimits {
    pub albums: u32,
    pub standalones: u32,
}

/// Counts of what a run has downloaded so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub albums: u32,
    pub standalones: u32,
    /// Posts passed over without a download attempt.
    pub skipped: u32,
}

impl RunCounters {
    /// Both quotas are met; the run is over.
    pub fn quotas_met(&self, limits: &QuotaLimits) -> bool {
        self.album_quota_met(limits) && self.standalone_quota_met(limits)
    }

    pub fn album_quota_met(&self, limits: &QuotaLimits) -> bool {
        self.albums >= limits.albums
    }

    pub fn standalone_quota_met(&self, limits: &QuotaLimits) -> bool {
        self.standalones >= limits.standalones
    }

    /// Whether the quota that `target` would count towards is already met.
    pub fn quota_met_for(&self, target: DownloadTarget, limits: &QuotaLimits) -> bool {
        match target {
            DownloadTarget::Album => self.album_quota_met(limits),
            DownloadTarget::SingleImage | DownloadTarget::DirectFetch => {
                self.standalone_quota_met(limits)
            }
            DownloadTarget::Rejected => true,
        }
    }

    /// Count an album-host download by the number of images it produced.
    pub fn record_album_host(&mut self, images: usize) {
        match images {
            0 => {}
            1 => self.standalones += 1,
            _ => self.albums += 1,
        }
    }

    pub fn increment_standalone(&mut self) {
        self.standalones += 1;
    }

    pub fn increment_skipped(&mut self) {
        self.skipped += 1;
    }
}

/// How a post will be downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadTarget {
    /// Multi-image album on the album host.
    Album,
    /// Single image on the album host.
    SingleImage,
    /// Image on any other accepted host, fetched with a plain GET.
    DirectFetch,
    /// Not to be downloaded.
    Rejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_album_host() {
        let mut counters = RunCounters::default();
        counters.record_album_host(0);
        assert_eq!(counters, RunCounters::default());

        counters.record_album_host(1);
        counters.record_album_host(5);
        assert_eq!(counters.standalones, 1);
        assert_eq!(counters.albums, 1);
    }

    #[test]
    fn test_quotas() {
        let limits = QuotaLimits {
            albums: 1,
            standalones: 2,
        };
        let mut counters = RunCounters::default();
        assert!(!counters.quotas_met(&limits));

        counters.albums = 1;
        assert!(counters.quota_met_for(DownloadTarget::Album, &limits));
        assert!(!counters.quota_met_for(DownloadTarget::DirectFetch, &limits));
        assert!(!counters.quotas_met(&limits));

        counters.standalones = 3;
        assert!(counters.quotas_met(&limits));
    }

    #[test]
    fn test_zero_limits_are_met_immediately() {
        assert!(RunCounters::default().quotas_met(&QuotaLimits::default()));
    }
}
