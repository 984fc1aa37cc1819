//! Log event synthesizer.
//!
//! Every draw goes through the random source handed in by the caller, so a
//! seeded [`rand::rngs::StdRng`] (or a mock source) together with a fixed
//! timestamp reproduces the same record byte for byte.

use crate::catalog::{
    self, ERROR_MESSAGES, INFO_MESSAGES, IP_SERVICE, LEVEL_WEIGHTS, PAYMENT_SERVICE, SERVICES,
    WARN_MESSAGES,
};
use crate::record::{Level, LogEvent};
use crate::weighted::weighted_choice;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate one event stamped with the current wall-clock time.
pub fn generate_event<R: Rng + ?Sized>(rng: &mut R) -> LogEvent {
    generate_event_at(rng, Utc::now())
}

/// Generate one event with an explicit timestamp.
pub fn generate_event_at<R: Rng + ?Sized>(rng: &mut R, timestamp: DateTime<Utc>) -> LogEvent {
    let level = weighted_choice(rng, &LEVEL_WEIGHTS)
        .copied()
        .unwrap_or(Level::Info);
    generate_event_with_level(rng, level, timestamp)
}

/// Generate one event of a given level; the remaining fields are drawn as usual.
pub fn generate_event_with_level<R: Rng + ?Sized>(
    rng: &mut R,
    level: Level,
    timestamp: DateTime<Utc>,
) -> LogEvent {
    let service: &str = pick(rng, &SERVICES);
    let host: &str = pick(rng, catalog::hosts_for(service));

    let mut event = LogEvent {
        timestamp,
        level,
        service: service.to_string(),
        host: host.to_string(),
        request_id: request_id(rng),
        message: String::new(),
        status_code: 0,
        duration_ms: None,
        user_id: None,
        ip_address: None,
        amount: None,
        error: None,
    };

    match level {
        Level::Info => fill_info(rng, &mut event),
        Level::Warn => fill_warn(rng, &mut event),
        Level::Error => fill_error(rng, &mut event),
    }

    event
}

fn fill_info<R: Rng + ?Sized>(rng: &mut R, event: &mut LogEvent) {
    event.message = pick(rng, &INFO_MESSAGES).to_string();
    event.duration_ms = Some(rng.gen_range(10..=500));
    event.status_code = pick(rng, catalog::status_codes_for(Level::Info));

    if rng.gen_bool(0.7) {
        event.user_id = Some(user_id(rng));
    }
    if rng.gen_bool(0.5) && event.service == IP_SERVICE {
        event.ip_address = Some(ip_address(rng));
    }
    if rng.gen_bool(0.3) && event.service == PAYMENT_SERVICE {
        event.amount = Some(amount(rng));
    }
}

fn fill_warn<R: Rng + ?Sized>(rng: &mut R, event: &mut LogEvent) {
    event.message = pick(rng, &WARN_MESSAGES).to_string();
    event.status_code = pick(rng, catalog::status_codes_for(Level::Warn));

    if rng.gen_bool(0.5) {
        event.duration_ms = Some(rng.gen_range(500..=2000));
    }
    if rng.gen_bool(0.4) {
        event.user_id = Some(user_id(rng));
    }
}

fn fill_error<R: Rng + ?Sized>(rng: &mut R, event: &mut LogEvent) {
    let (message, error_type) = pick(rng, &ERROR_MESSAGES);
    event.message = message.to_string();
    event.error = Some(error_type.to_string());
    event.status_code = pick(rng, catalog::status_codes_for(Level::Error));
    event.duration_ms = Some(rng.gen_range(1000..=10000));
}

// Catalog slices are never empty; the default only guards `hosts_for`.
fn pick<T: Copy + Default, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    items.choose(rng).copied().unwrap_or_default()
}

fn request_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("req-{:08x}", rng.gen::<u32>())
}

fn user_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("user-{}", rng.gen_range(10000..=99999))
}

fn ip_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let octets: [u8; 4] = std::array::from_fn(|_| rng.gen_range(1..=255));
    format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
}

fn amount<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let raw: f64 = rng.gen_range(9.99..=999.99);
    (raw * 100.0).round() / 100.0
}
