use log::warn;

/// Anything that can supply the two dirty-data limits of a job.
pub trait LimitSource {
    fn record_limit(&self) -> Option<i64>;
    fn percentage_limit(&self) -> Option<f64>;
}

/// Validated dirty-data tolerance of a job.
///
/// An absolute record limit disables the percentage limit entirely.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThresholdPolicy {
    record_limit: Option<u64>,
    percentage_limit: Option<f64>,
}

impl ThresholdPolicy {
    pub fn try_new(record_limit: Option<i64>, percentage_limit: Option<f64>) -> super::Result<Self> {
        if let Some(percentage) = percentage_limit {
            if !(0.0..=1.0).contains(&percentage) {
                return Err(super::Error::InvalidPercentageLimit(percentage));
            }
        }

        let record_limit = record_limit
            .map(|limit| u64::try_from(limit).map_err(|_| super::Error::NegativeRecordLimit(limit)))
            .transpose()?;

        let percentage_limit = match (record_limit, percentage_limit) {
            (Some(limit), Some(percentage)) => {
                warn!(
                    "Both dirty record limit {} and percentage limit {} are set, the percentage limit is ignored",
                    limit, percentage
                );
                None
            }
            (_, percentage) => percentage,
        };

        Ok(Self {
            record_limit,
            percentage_limit,
        })
    }

    pub fn try_create_from<S: LimitSource + ?Sized>(source: &S) -> super::Result<Self> {
        Self::try_new(source.record_limit(), source.percentage_limit())
    }

    pub fn record_limit(&self) -> Option<u64> {
        self.record_limit
    }

    pub fn percentage_limit(&self) -> Option<f64> {
        self.percentage_limit
    }
}
