//! Random record definitions for demo and test data.

use crate::db::now_epoch_ms;
use crate::model::brand::Brand;
use crate::model::product::Product;
use crate::model::RecordId;
use crate::util::date::add_days;
use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

const WORDS: &[&str] = &[
    "amber", "atlas", "birch", "cobalt", "copper", "delta", "ember", "falcon", "fjord", "granite",
    "harbor", "indigo", "juniper", "kestrel", "lumen", "maple", "meadow", "nimbus", "onyx",
    "orchid", "pebble", "quartz", "raven", "sable", "summit", "tidal", "umber", "velvet",
    "willow", "zephyr",
];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "webp"];
const MAX_AGE_DAYS: i64 = 5 * 365;
const MAX_UPDATE_LAG_DAYS: i64 = 365;
const MIN_PRICE_CENTS: i64 = 100;
const MAX_PRICE_CENTS: i64 = 50_000;

/// Builds brand and product rows with plausible random content.
///
/// Timestamps always satisfy `created_at <= updated_at <= now`.
pub struct CatalogFactory<R: Rng> {
    rng: R,
    now_ms: i64,
}

impl CatalogFactory<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for CatalogFactory<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogFactory<StdRng> {
    /// Deterministic factory for reproducible fixtures.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CatalogFactory<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            now_ms: now_epoch_ms(),
        }
    }

    /// One brand: a capitalized word and a short sentence.
    pub fn brand(&mut self) -> Brand {
        let (created_at, updated_at) = self.timestamps();
        Brand {
            id: Uuid::new_v4(),
            name: capitalize(self.word()),
            description: self.sentence(),
            created_at,
            updated_at,
        }
    }

    /// One product owned by `brand_id`.
    pub fn product(&mut self, brand_id: RecordId) -> Product {
        let (created_at, updated_at) = self.timestamps();
        let name = format!("{} {}", capitalize(self.word()), self.word());
        let image_url = if self.rng.gen_bool(0.5) {
            let extension = IMAGE_EXTENSIONS
                .choose(&mut self.rng)
                .copied()
                .unwrap_or("png");
            Some(format!(
                "https://images.example.com/{}.{extension}",
                name.replace(' ', "-").to_lowercase()
            ))
        } else {
            None
        };

        Product {
            id: Uuid::new_v4(),
            brand_id,
            name,
            description: self.sentence(),
            price_cents: self.rng.gen_range(MIN_PRICE_CENTS..=MAX_PRICE_CENTS),
            image_url,
            created_at,
            updated_at,
        }
    }

    /// Picks one element uniformly, `None` for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    fn word(&mut self) -> &'static str {
        WORDS.choose(&mut self.rng).copied().unwrap_or("item")
    }

    fn sentence(&mut self) -> String {
        let length = self.rng.gen_range(4..=9);
        let words = (0..length).map(|_| self.word()).collect::<Vec<_>>();
        format!("{}.", capitalize(&words.join(" ")))
    }

    fn timestamps(&mut self) -> (i64, i64) {
        let created_at = add_days(self.now_ms, -self.rng.gen_range(0..=MAX_AGE_DAYS));
        let lag_days = self.rng.gen_range(0..=MAX_UPDATE_LAG_DAYS);
        let updated_at = add_days(created_at, lag_days).min(self.now_ms);
        (created_at, updated_at)
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
