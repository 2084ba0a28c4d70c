use rand::{Rng, RngCore};
use rand_distr::{Distribution, LogNormal, Normal};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::{
    AVAILABILITY_DAYS, GENDER_FEMALE, GENDER_MALE, LANGUAGE_OPTIONS, MOBILITY_OPTIONS,
    PLACEHOLDER_FIRST_NAME, PLACEHOLDER_ID_PREFIX, STATUS_OPTIONS,
};
use crate::domain::{EnrichedProfile, NameRow, TimeSlot};
use crate::error::Result;
use crate::pipeline::ingestion::corpus::CorpusPatterns;
use crate::pipeline::processing::sampling::{uniform_sample, weighted_sample};

const RATING_MEAN: f64 = 4.4;
const RATING_STD_DEV: f64 = 0.4;
const RATING_MIN: f64 = 3.5;
const RATING_MAX: f64 = 5.0;

const REVIEWS_MU: f64 = 3.5;
const REVIEWS_SIGMA: f64 = 1.2;
const REVIEWS_MIN: i64 = 10;
const REVIEWS_MAX: i64 = 300;

const EXPERIENCE_MEAN: f64 = 6.0;
const EXPERIENCE_STD_DEV: f64 = 3.0;
const EXPERIENCE_MIN: i64 = 1;
const EXPERIENCE_MAX: i64 = 20;

const FEMALE_PROBABILITY: f64 = 0.85;
/// isProfileUpdated is set when a uniform draw exceeds this
const PROFILE_UPDATED_THRESHOLD: f64 = 0.3;

const SLOT_FIRST_HOUR: u32 = 8;
const SLOT_LAST_HOUR: u32 = 18;
const SLOT_HOURS: u32 = 2;

/// Turns a name row into a full synthetic profile.
pub trait Enricher {
    fn enrich(&self, row: &NameRow, rng: &mut dyn RngCore) -> Result<EnrichedProfile>;
}

/// Enricher that samples specializations and municipalities from a reference
/// corpus and every other attribute from fixed distributions.
pub struct DefaultEnricher {
    patterns: CorpusPatterns,
    /// Stamped on every profile of the run
    updated_at: String,
    rating: Normal<f64>,
    reviews: LogNormal<f64>,
    experience: Normal<f64>,
}

impl DefaultEnricher {
    pub fn new(patterns: CorpusPatterns, updated_at: impl Into<String>) -> Result<Self> {
        Ok(Self {
            patterns,
            updated_at: updated_at.into(),
            rating: Normal::new(RATING_MEAN, RATING_STD_DEV)?,
            reviews: LogNormal::new(REVIEWS_MU, REVIEWS_SIGMA)?,
            experience: Normal::new(EXPERIENCE_MEAN, EXPERIENCE_STD_DEV)?,
        })
    }

    pub fn patterns(&self) -> &CorpusPatterns {
        &self.patterns
    }

    /// Rating in [3.5, 5.0] with one decimal, centred on 4.4.
    pub fn generate_rating<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let rating = self.rating.sample(rng).clamp(RATING_MIN, RATING_MAX);
        (rating * 10.0).round() / 10.0
    }

    /// Review count in [10, 300], log-normally distributed.
    pub fn generate_review_count<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        (self.reviews.sample(rng) as i64).clamp(REVIEWS_MIN, REVIEWS_MAX)
    }

    /// Years of experience in [1, 20].
    pub fn generate_experience_years<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        (self.experience.sample(rng) as i64).clamp(EXPERIENCE_MIN, EXPERIENCE_MAX)
    }
}

impl Enricher for DefaultEnricher {
    fn enrich(&self, row: &NameRow, rng: &mut dyn RngCore) -> Result<EnrichedProfile> {
        let identity = Identity::resolve(row);

        let num_specs = rng.gen_range(2..=4);
        let specialization = weighted_sample(
            rng,
            &self.patterns.specializations,
            &self.patterns.specialization_weights,
            num_specs,
        )?;

        let num_cities = rng.gen_range(1..=3);
        let municipality = weighted_sample(
            rng,
            &self.patterns.municipalities,
            &self.patterns.municipality_weights,
            num_cities,
        )?;

        let num_mobility = rng.gen_range(2..=4);
        let mobility = owned(uniform_sample(rng, &MOBILITY_OPTIONS, num_mobility));

        let gender = generate_gender(rng).to_string();
        let num_status = rng.gen_range(1..=2);
        let status = owned(uniform_sample(rng, &STATUS_OPTIONS, num_status));
        let is_profile_updated = rng.gen::<f64>() > PROFILE_UPDATED_THRESHOLD;

        let rating = self.generate_rating(rng);
        let reviews_count = self.generate_review_count(rng);
        let experience_years = self.generate_experience_years(rng);
        let availability = generate_availability(rng);
        let num_languages = rng.gen_range(1..=3);
        let languages = owned(uniform_sample(rng, &LANGUAGE_OPTIONS, num_languages));

        Ok(EnrichedProfile {
            nurse_id: identity.nurse_id,
            first_name: identity.first_name,
            last_name: identity.last_name,
            gender,
            specialization,
            mobility,
            municipality,
            updated_at: self.updated_at.clone(),
            status,
            is_active: true,
            is_profile_updated,
            is_onboarding_completed: true,
            is_approved: true,
            rating,
            reviews_count,
            experience_years,
            availability,
            languages,
        })
    }
}

/// Name-row identity with placeholders substituted for missing cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub nurse_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Identity {
    pub fn resolve(row: &NameRow) -> Self {
        Self {
            nurse_id: row
                .id
                .clone()
                .unwrap_or_else(|| format!("{}{}", PLACEHOLDER_ID_PREFIX, row.index)),
            first_name: row
                .first_name
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_FIRST_NAME.to_string()),
            last_name: row.last_name.clone().unwrap_or_else(|| row.index.to_string()),
        }
    }
}

fn owned(values: Vec<&str>) -> Vec<String> {
    values.into_iter().map(str::to_string).collect()
}

pub fn generate_gender<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    if rng.gen::<f64>() < FEMALE_PROBABILITY {
        GENDER_FEMALE
    } else {
        GENDER_MALE
    }
}

/// 3–5 of the fixed days, each with 2–4 two-hour slots starting between 08:00 and 18:00.
pub fn generate_availability<R: Rng + ?Sized>(rng: &mut R) -> BTreeMap<String, Vec<TimeSlot>> {
    let num_days = rng.gen_range(3..=5);
    let days = uniform_sample(rng, &AVAILABILITY_DAYS, num_days);

    let mut availability = BTreeMap::new();
    for day in days {
        let num_slots = rng.gen_range(2..=4);
        let mut slots = Vec::with_capacity(num_slots);
        for _ in 0..num_slots {
            let hour = rng.gen_range(SLOT_FIRST_HOUR..=SLOT_LAST_HOUR);
            slots.push(TimeSlot {
                start: format!("{:02}:00", hour),
                end: format!("{:02}:00", hour + SLOT_HOURS),
            });
        }
        availability.insert(day.to_string(), slots);
    }
    availability
}

/// Aggregate figures over an enrichment run, logged at the end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichmentSummary {
    pub total: usize,
    pub mean_rating: f64,
    pub mean_reviews: f64,
    pub mean_experience_years: f64,
    pub female: usize,
    pub male: usize,
}

impl EnrichmentSummary {
    pub fn from_profiles(profiles: &[EnrichedProfile]) -> Self {
        let total = profiles.len();
        let mean = |sum: f64| if total == 0 { 0.0 } else { sum / total as f64 };

        Self {
            total,
            mean_rating: mean(profiles.iter().map(|p| p.rating).sum()),
            mean_reviews: mean(profiles.iter().map(|p| p.reviews_count as f64).sum()),
            mean_experience_years: mean(profiles.iter().map(|p| p.experience_years as f64).sum()),
            female: profiles.iter().filter(|p| p.gender == GENDER_FEMALE).count(),
            male: profiles.iter().filter(|p| p.gender == GENDER_MALE).count(),
        }
    }

    pub fn female_share(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.female as f64 / self.total as f64
        }
    }
}
