//! Wiring: population seed → registry → session → terminal

use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::{Arc, Mutex, PoisonError};
use tickboard_core::{
    entropy_source, CounterRegistry, CounterSession, CounterTemplate, RandomSource, SeedContext,
    FALLBACK_POPULATION,
};
use tickboard_sources::{builtin_templates, instantiate_all, PopulationFetcher};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Instant, Interval};

use crate::config::AppConfig;
use crate::display::TerminalRenderer;

/// Built-in templates followed by the user's extra counters
pub fn templates(config: &AppConfig) -> Vec<CounterTemplate> {
    let mut templates = builtin_templates();
    templates.extend(config.extra_counters.iter().cloned());
    templates
}

/// Resolve the population seed, honouring offline mode
pub async fn resolve_population(config: &AppConfig) -> f64 {
    if config.population.offline {
        info!("Offline mode, using fallback population {}", FALLBACK_POPULATION);
        return FALLBACK_POPULATION;
    }
    PopulationFetcher::new(config.population.endpoint.clone(), config.population.timeout())
        .fetch_population()
        .await
}

/// Build and validate the registry for `config`
pub fn build_registry<R: RandomSource + ?Sized>(
    config: &AppConfig,
    population: f64,
    rng: &mut R,
) -> Result<CounterRegistry> {
    let counters = instantiate_all(&templates(config), rng, &SeedContext::new(population));
    CounterRegistry::new(counters).context("Invalid counter configuration")
}

/// Counter the board opens on
pub fn initial_counter_id<R: RandomSource + ?Sized>(
    config: &AppConfig,
    registry: &CounterRegistry,
    rng: &mut R,
) -> String {
    if let Some(ref id) = config.initial_counter {
        return id.clone();
    }
    if config.random_start {
        return registry.pick_random_id(rng).to_string();
    }
    registry.first().id.clone()
}

/// Print the counter catalogue
pub fn list_counters(config: &AppConfig) {
    println!("{:<12} {:>10} {:>8}  TITLE", "ID", "RATE", "EVERY");
    for template in templates(config) {
        let sign = if template.is_positive { "+" } else { "-" };
        println!(
            "{:<12} {:>10} {:>7}s  {} {}",
            template.id,
            format!("{}{}", sign, template.rate),
            template.speed,
            template.title,
            template.subtitle
        );
    }
}

async fn next_cycle(cycle: &mut Option<Interval>) {
    match cycle {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Run the board until the user quits.
///
/// Enter switches to the next counter, `q` quits, Ctrl-C quits.
pub async fn run(config: AppConfig) -> Result<()> {
    config.validate().context("Invalid configuration")?;
    let mut rng = entropy_source();

    let population = resolve_population(&config).await;
    let registry = build_registry(&config, population, rng.as_mut())?;
    let start_id = initial_counter_id(&config, &registry, rng.as_mut());
    info!("Loaded {} counters, starting on '{}'", registry.len(), start_id);

    let renderer = Arc::new(Mutex::new(TerminalRenderer::stdout(config.output)));
    let mut session = CounterSession::new(registry, rng).with_population(population);

    let sink = Arc::clone(&renderer);
    session.subscribe(move |snapshot| {
        sink.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .render(snapshot);
    });
    session.start(&start_id)?;

    let mut cycle = config
        .cycle_interval()
        .map(|period| interval_at(Instant::now() + period, period));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line.context("Failed to read from stdin")? {
                    Some(input) if input.trim().eq_ignore_ascii_case("q") => break,
                    Some(_) => session.switch_next()?,
                    None => {
                        debug!("stdin closed, only Ctrl-C or the cycle timer remain");
                        stdin_open = false;
                    }
                }
            }
            _ = next_cycle(&mut cycle) => session.switch_next()?,
            _ = &mut ctrl_c => break,
        }
    }

    session.stop();
    renderer
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .finish();
    Ok(())
}
