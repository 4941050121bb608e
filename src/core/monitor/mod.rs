//! Dirty-data threshold checks.
//!
//! The monitor holds no counters. Each check is a pure read of an
//! [`ErrorMetrics`] snapshot taken from the job's metrics source.

mod error;
mod policy;

pub use error::{Breach, Error, Result};
pub use policy::{LimitSource, ThresholdPolicy};

use log::debug;

use super::stats::ErrorMetrics;

#[derive(Debug, Clone, Copy)]
pub struct ErrorThresholdMonitor {
    policy: ThresholdPolicy,
}

impl ErrorThresholdMonitor {
    pub fn new(policy: ThresholdPolicy) -> Self {
        Self { policy }
    }

    pub fn try_create_from<S: LimitSource + ?Sized>(source: &S) -> Result<Self> {
        Ok(Self::new(ThresholdPolicy::try_create_from(source)?))
    }

    pub fn policy(&self) -> &ThresholdPolicy {
        &self.policy
    }

    pub fn is_record_check_active(&self) -> bool {
        self.policy.record_limit().is_some()
    }

    pub fn is_percentage_check_active(&self) -> bool {
        self.policy.percentage_limit().is_some()
    }

    /// Fails once the error count is strictly above the record limit. Cheap
    /// enough to call after every batch.
    pub fn check_record_limit(&self, metrics: &ErrorMetrics) -> Result<()> {
        let Some(limit) = self.policy.record_limit() else {
            return Ok(());
        };

        debug!(
            "Error-limit set to {}, error count check ({} caught)",
            limit, metrics.error
        );

        if metrics.error > limit {
            return Err(Error::DirtyDataLimitExceeded(Breach::Records {
                limit,
                observed: metrics.error,
            }));
        }

        Ok(())
    }

    /// Fails once the error ratio is strictly above the percentage limit.
    ///
    /// Meant for the end of a job; nothing is checked before the first record
    /// has been read.
    pub fn check_percentage_limit(&self, metrics: &ErrorMetrics) -> Result<()> {
        let Some(limit) = self.policy.percentage_limit() else {
            return Ok(());
        };

        debug!("Error-limit set to {:.6}, error percent check", limit);

        let Some(ratio) = metrics.error_ratio() else {
            debug!("No records read yet, skipping error percent check");
            return Ok(());
        };

        if ratio > limit {
            return Err(Error::DirtyDataLimitExceeded(Breach::Percentage {
                limit,
                observed: ratio,
            }));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Limits(Option<i64>, Option<f64>);

    impl LimitSource for Limits {
        fn record_limit(&self) -> Option<i64> {
            self.0
        }

        fn percentage_limit(&self) -> Option<f64> {
            self.1
        }
    }

    fn monitor(record: Option<i64>, percentage: Option<f64>) -> ErrorThresholdMonitor {
        ErrorThresholdMonitor::try_create_from(&Limits(record, percentage)).unwrap()
    }

    #[test]
    fn test_record_limit_boundary() {
        let m = monitor(Some(5), None);

        assert!(m.check_record_limit(&ErrorMetrics::new(100, 5)).is_ok());
        let err = m.check_record_limit(&ErrorMetrics::new(100, 6)).unwrap_err();
        assert!(matches!(
            err,
            Error::DirtyDataLimitExceeded(Breach::Records {
                limit: 5,
                observed: 6
            })
        ));
        assert!(err.to_string().contains("[5]"));
        assert!(err.to_string().contains("[6]"));
    }

    #[test]
    fn test_zero_record_limit_rejects_any_dirty_record() {
        let m = monitor(Some(0), None);
        assert!(m.check_record_limit(&ErrorMetrics::new(10, 0)).is_ok());
        assert!(m.check_record_limit(&ErrorMetrics::new(10, 1)).is_err());
    }

    #[test]
    fn test_percentage_limit_boundary() {
        let m = monitor(None, Some(0.1));

        assert!(m.check_percentage_limit(&ErrorMetrics::new(100, 10)).is_ok());
        let err = m
            .check_percentage_limit(&ErrorMetrics::new(100, 11))
            .unwrap_err();
        match err {
            Error::DirtyDataLimitExceeded(Breach::Percentage { limit, observed }) => {
                assert_eq!(limit, 0.1);
                assert_eq!(observed, 0.11);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_percentage_skipped_without_reads() {
        let m = monitor(None, Some(0.0));
        assert!(m.check_percentage_limit(&ErrorMetrics::new(0, 0)).is_ok());
        assert!(m.check_percentage_limit(&ErrorMetrics::new(0, 7)).is_ok());
        assert!(m.check_percentage_limit(&ErrorMetrics::new(1, 1)).is_err());
    }

    #[test]
    fn test_record_limit_wins() {
        let m = monitor(Some(1_000), Some(0.01));

        assert!(m.is_record_check_active());
        assert!(!m.is_percentage_check_active());
        assert_eq!(m.policy().percentage_limit(), None);

        for (read, error) in [(0, 0), (1, 1), (100, 99), (10, 10)] {
            assert!(m
                .check_percentage_limit(&ErrorMetrics::new(read, error))
                .is_ok());
        }
    }

    #[test]
    fn test_no_limits_never_fail() {
        let m = monitor(None, None);
        let metrics = ErrorMetrics::new(10, 10);

        assert!(m.check_record_limit(&metrics).is_ok());
        assert!(m.check_percentage_limit(&metrics).is_ok());
    }

    #[test]
    fn test_invalid_policies() {
        assert!(matches!(
            ThresholdPolicy::try_new(None, Some(1.5)),
            Err(Error::InvalidPercentageLimit(_))
        ));
        assert!(matches!(
            ThresholdPolicy::try_new(None, Some(-0.1)),
            Err(Error::InvalidPercentageLimit(_))
        ));
        assert!(matches!(
            ThresholdPolicy::try_new(None, Some(f64::NAN)),
            Err(Error::InvalidPercentageLimit(_))
        ));
        assert!(matches!(
            ThresholdPolicy::try_new(Some(-1), None),
            Err(Error::NegativeRecordLimit(-1))
        ));
        assert!(ThresholdPolicy::try_new(Some(0), Some(0.0)).is_ok());
        assert!(ThresholdPolicy::try_new(None, Some(1.0)).is_ok());
    }

    #[test]
    fn test_invalid_percentage_checked_even_with_record_limit() {
        assert!(ThresholdPolicy::try_new(Some(3), Some(2.0)).is_err());
    }
}
