use chrono::{Duration, FixedOffset, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::PipelineError;
use crate::models::RawRecord;
use crate::source::RecordSource;
use crate::types::Timestamp;

const USER_COUNT: u32 = 20;
const MERCHANT_COUNT: u32 = 12;
const BURST_USER: &str = "U999";

const COUNTRIES: [&str; 10] = ["PE", "PE", "PE", "PE", "pe", "US", "BR", "CO", "cl", "MX"];
const MALFORMED_AMOUNTS: [&str; 4] = ["N/A", "abc", "1.2.3", "12,50"];
const MALFORMED_TIMESTAMPS: [&str; 3] = ["not-a-date", "2024-13-45 25:61:00", "yesterday"];

// Defects repeat every 25 records and fraud patterns every 50, counted from the start of each
// batch, so the shape of a batch depends only on its size.
const DEFECT_PERIOD: usize = 25;
const PATTERN_PERIOD: usize = 50;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Slot {
    Regular,
    MissingAmount,
    MalformedAmount,
    MalformedTimestamp,
    MissingCountry,
    MissingStatus,
    MissingUser,
    Duplicate,
    DeclineBurst,
    HighValueInternational
}

impl Slot {
    fn at(index: usize) -> Self {
        match index % PATTERN_PERIOD {
            23 => return Slot::Duplicate,
            33..=35 => return Slot::DeclineBurst,
            41 => return Slot::HighValueInternational,
            _ => {}
        }

        match index % DEFECT_PERIOD {
            3 => Slot::MissingAmount,
            7 => Slot::MalformedAmount,
            11 => Slot::MalformedTimestamp,
            15 => Slot::MissingCountry,
            19 => Slot::MissingStatus,
            21 => Slot::MissingUser,
            _ => Slot::Regular
        }
    }
}

/// Synthetic transaction source.
///
/// Content is random, but every batch of the same size carries the same defects and injected
/// fraud patterns at the same positions: per 25 records one missing amount, one malformed
/// amount, one malformed timestamp, one missing user (all dropped by cleaning) and one each
/// missing country and status (defaulted); per 50 records one exact duplicate, a burst of three
/// declines from one user and one high-value international charge.
pub struct TransactionGenerator {
    rng: StdRng,
    next_transaction: u64,
    clock: Box<dyn Fn() -> Timestamp + Send>
}

impl TransactionGenerator {
    /// A generator seeded from OS entropy, stamping records relative to the wall clock.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            next_transaction: 1,
            clock: Box::new(Utc::now)
        }
    }

    /// A generator with reproducible content for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            next_transaction: 1,
            clock: Box::new(Utc::now)
        }
    }

    /// Pins the reference time, making the output fully reproducible.
    #[cfg(test)]
    pub fn starting_at(mut self, start: Timestamp) -> Self {
        self.clock = Box::new(move || start);
        self
    }

    fn regular(&mut self, now: Timestamp) -> RawRecord {
        let transaction_id = format!("TX{:08}", self.next_transaction);
        self.next_transaction += 1;

        RawRecord {
            transaction_id: Some(transaction_id),
            user_id: Some(format!("U{:03}", self.rng.gen_range(1..=USER_COUNT))),
            merchant_id: Some(format!("M{:03}", self.rng.gen_range(1..=MERCHANT_COUNT))),
            amount: Some(self.amount()),
            timestamp: Some(self.timestamp(now)),
            country: Some(COUNTRIES[self.rng.gen_range(0..COUNTRIES.len())].to_string()),
            status: Some(self.status().to_string())
        }
    }

    fn amount(&mut self) -> String {
        let roll: f64 = self.rng.r#gen();

        let value = if roll < 0.70 {
            self.rng.gen_range(5.0..200.0)
        } else if roll < 0.95 {
            self.rng.gen_range(200.0..900.0)
        } else {
            self.rng.gen_range(900.0..4000.0)
        };

        format!("{value:.2}")
    }

    fn status(&mut self) -> &'static str {
        let roll: f64 = self.rng.r#gen();

        if roll < 0.80 {
            "approved"
        } else if roll < 0.92 {
            "declined"
        } else if roll < 0.97 {
            "pending"
        } else {
            "reversed"
        }
    }

    fn timestamp(&mut self, now: Timestamp) -> String {
        let moment = now - Duration::seconds(self.rng.gen_range(0..3600));
        let roll: f64 = self.rng.r#gen();

        if roll < 0.70 {
            moment.format("%Y-%m-%d %H:%M:%S").to_string()
        } else if roll < 0.90 {
            match FixedOffset::west_opt(5 * 3600) {
                Some(lima) => moment.with_timezone(&lima).to_rfc3339(),
                None => moment.to_rfc3339()
            }
        } else {
            moment.format("%Y-%m-%dT%H:%M:%SZ").to_string()
        }
    }

    fn pick<'a>(&mut self, values: &[&'a str]) -> &'a str {
        values[self.rng.gen_range(0..values.len())]
    }
}

impl Default for TransactionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for TransactionGenerator {
    fn generate(&mut self, count: usize) -> Result<Vec<RawRecord>, PipelineError> {
        let now = (self.clock)();
        let mut batch: Vec<RawRecord> = Vec::with_capacity(count);

        for index in 0..count {
            let slot = Slot::at(index);

            if slot == Slot::Duplicate {
                if let Some(previous) = batch.last().cloned() {
                    batch.push(previous);
                    continue;
                }
            }

            let mut record = self.regular(now);

            match slot {
                Slot::MissingAmount => record.amount = None,
                Slot::MalformedAmount => record.amount = Some(self.pick(&MALFORMED_AMOUNTS).to_string()),
                Slot::MalformedTimestamp => record.timestamp = Some(self.pick(&MALFORMED_TIMESTAMPS).to_string()),
                Slot::MissingCountry => record.country = None,
                Slot::MissingStatus => record.status = None,
                Slot::MissingUser => record.user_id = None,
                Slot::DeclineBurst => {
                    record.user_id = Some(BURST_USER.to_string());
                    record.status = Some("declined".to_string());
                }
                Slot::HighValueInternational => {
                    record.country = Some("US".to_string());
                    record.amount = Some(format!("{:.2}", self.rng.gen_range(2500.0..9000.0)));
                    record.status = Some("approved".to_string());
                }
                Slot::Regular | Slot::Duplicate => {}
            }

            batch.push(record);
        }

        Ok(batch)
    }
}
