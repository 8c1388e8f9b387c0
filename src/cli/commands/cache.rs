//! Cache command - inspect or delete the statistics cache

use crate::cache::{CacheInstance, CacheStore};
use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::{resolve_cache_path, Config};
use crate::error::StatcardResult;
use crate::ui::{self, UiContext};
use console::style;

/// How many languages `cache info` lists
const TOP_LANGUAGES: usize = 10;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> StatcardResult<()> {
    let store = CacheStore::new(resolve_cache_path(config, args.cache_file));

    match args.action {
        CacheAction::Info => show_info(&store).await,
        CacheAction::Clear { yes } => clear(&UiContext::detect().with_auto_yes(yes), &store).await,
    }
}

async fn show_info(store: &CacheStore) -> StatcardResult<()> {
    let ctx = UiContext::detect();
    println!("Cache: {}", store.path().display());

    let Some(cache) = store.try_load().await? else {
        println!("No cache file found.");
        return Ok(());
    };

    print_info(&ctx, &cache);
    Ok(())
}

fn print_info(ctx: &UiContext, cache: &CacheInstance) {
    let (commits, additions, deletions) =
        cache
            .entries
            .values()
            .fold((0u64, 0u64, 0u64), |(c, a, d), entry| {
                (c + entry.commits, a + entry.additions, d + entry.deletions)
            });

    ui::key_value(ctx, "version", &cache.version.to_string());
    ui::key_value(ctx, "repositories", &cache.entries.len().to_string());
    ui::key_value(ctx, "commits", &commits.to_string());
    ui::key_value(ctx, "additions", &additions.to_string());
    ui::key_value(ctx, "deletions", &deletions.to_string());

    if cache.language_totals.is_empty() {
        return;
    }

    let total: u64 = cache.language_totals.values().sum();
    let mut languages: Vec<(&String, &u64)> = cache.language_totals.iter().collect();
    languages.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    println!();
    println!("{:<20} {:>12} {:>7}", "LANGUAGE", "BYTES", "SHARE");
    println!("{}", "-".repeat(41));
    for (name, size) in languages.iter().take(TOP_LANGUAGES) {
        let share = if total == 0 {
            0.0
        } else {
            **size as f64 / total as f64 * 100.0
        };
        println!("{:<20} {:>12} {:>6.1}%", name, size, share);
    }
    if languages.len() > TOP_LANGUAGES {
        println!(
            "{}",
            style(format!("... and {} more", languages.len() - TOP_LANGUAGES)).dim()
        );
    }
}

async fn clear(ctx: &UiContext, store: &CacheStore) -> StatcardResult<()> {
    let path = store.path().display().to_string();

    if !store.path().exists() {
        ui::step_info(ctx, &format!("No cache file at {}", path));
        return Ok(());
    }

    let confirmed = ui::confirm(ctx, &format!("Delete {}?", path), false).await?;
    if !confirmed {
        ui::step_warn(ctx, "Cache not deleted");
        ui::remark(ctx, "Use --yes to delete without a prompt");
        return Ok(());
    }

    if store.clear().await? {
        ui::step_ok(ctx, &format!("Deleted {}", path));
    }
    Ok(())
}
