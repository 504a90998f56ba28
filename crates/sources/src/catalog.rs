//! Built-in counters

use tickboard_core::{CounterDescriptor, CounterTemplate, RandomSource, SeedContext};
use tickboard_types::{DisasterType, LargeNumberSpec, ValueSeed};

/// Births per second, worldwide
pub const BIRTH_RATE: f64 = 4.5;

/// Deaths per second, worldwide
pub const DEATH_RATE: f64 = 1.7;

fn uniform(min: f64, max: f64, decimals: u32) -> ValueSeed {
    ValueSeed::Uniform { min, max, decimals }
}

fn large(base_digits: u32, min_multiplier: u64, max_multiplier: u64) -> ValueSeed {
    ValueSeed::Large(LargeNumberSpec::new(base_digits, min_multiplier, max_multiplier))
}

fn fixed(value: f64) -> ValueSeed {
    ValueSeed::Fixed { value }
}

/// Templates for every built-in counter, in display order
pub fn builtin_templates() -> Vec<CounterTemplate> {
    vec![
        CounterTemplate::new("people", "World Population", "(Simulated)", ValueSeed::Population)
            .rate(BIRTH_RATE - DEATH_RATE)
            .speed(0.7)
            .disasters(DisasterType::world_defaults()),
        CounterTemplate::new("jello", "Jello Shots", "(Tonight)", fixed(0.0)).speed(1.5),
        CounterTemplate::new("barks", "Barks from dog next door", "(Ongoing)", large(6, 1, 10))
            .speed(0.5)
            .reseed(ValueSeed::Large(LargeNumberSpec::default())),
        CounterTemplate::new(
            "trump",
            "Trump lies this year",
            "(~21 per day)",
            ValueSeed::YearToDate { per_day: 21.0 },
        )
        .speed(4114.0),
        CounterTemplate::new("tiktok", "TikTok's Watched", "(Today)", uniform(25.0, 999.0, 3))
            .speed(12.0),
        CounterTemplate::new(
            "emails",
            "Spam emails received",
            "(You won't believe #28492)",
            fixed(134_928.0),
        )
        .speed(0.1),
        CounterTemplate::new("farts", "Farts", "(No escape)", uniform(12.0, 999.0, 3)).speed(3.0),
        CounterTemplate::new("thoughts", "My bad vibes", "(Temporarily out of stock)", fixed(0.0))
            .rate(0.0)
            .speed(1.5),
        CounterTemplate::new("vape", "Vape hits", "(Per minute, probably)", uniform(12.0, 999.0, 3))
            .speed(60.0),
        CounterTemplate::new("tabs", "Browser tabs I've opened", "(None of them closed)", large(6, 2, 5))
            .speed(52.0),
        CounterTemplate::new("terms", "Terms & Conditions", "(Unread)", large(6, 2, 5)).speed(3.0),
        CounterTemplate::new("influencers", "Influencer Apologies", "(This week)", uniform(120.0, 999.0, 3))
            .speed(5.0),
        CounterTemplate::new("strangers", "Strangers who've smiled", "(Today)", large(8, 9, 29))
            .rate(333.0)
            .speed(1.5),
        CounterTemplate::new(
            "truths",
            "Truths Ignored",
            "(Accumulating faster than answers)",
            large(10, 10, 10),
        )
        .rate(66_666.0)
        .speed(1.5),
    ]
}

/// Resolve every built-in template into a descriptor
pub fn builtin_counters<R: RandomSource + ?Sized>(rng: &mut R, ctx: &SeedContext) -> Vec<CounterDescriptor> {
    instantiate_all(&builtin_templates(), rng, ctx)
}

pub fn instantiate_all<R: RandomSource + ?Sized>(
    templates: &[CounterTemplate],
    rng: &mut R,
    ctx: &SeedContext,
) -> Vec<CounterDescriptor> {
    templates.iter().map(|t| t.instantiate(rng, ctx)).collect()
}
