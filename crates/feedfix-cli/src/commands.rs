use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use feedfix_cache::{cache_path, remove_cached_feed};
use feedfix_cli::pipeline::{load_feed, summarize_buckets};
use feedfix_patch::{DryRunClient, PatchClient, PatchPlan, build_plan, write_plan};

use crate::cli::{ClearCacheArgs, FixArgs, InspectArgs};
use crate::types::{ClearCacheResult, FixResult, InspectResult};

pub fn run_fix(args: &FixArgs) -> Result<FixResult> {
    let fix_span = info_span!("fix", source = %args.xml.display());
    let _fix_guard = fix_span.enter();

    let loaded = load_feed(&args.xml, args.refresh)?;

    let plan_start = Instant::now();
    let plan = info_span!("plan")
        .in_scope(|| build_plan(&loaded.feed, &args.from, &args.to))
        .context("build patch plan")?;
    info!(
        blog_id = %plan.blog_id,
        patch_count = plan.patches.len(),
        duration_ms = plan_start.elapsed().as_millis(),
        "plan complete"
    );

    let plan_path = match &args.plan_out {
        Some(path) => {
            write_plan(path, &plan)
                .with_context(|| format!("write plan to {}", path.display()))?;
            info!(path = %path.display(), "plan written");
            Some(path.clone())
        }
        None => None,
    };

    let applied = if args.apply {
        let apply_start = Instant::now();
        let mut client = DryRunClient::new();
        for patch in &plan.patches {
            client
                .submit(&plan.blog_id, patch)
                .with_context(|| format!("submit {} {}", patch.kind, patch.id))?;
        }
        info!(
            patch_count = client.submitted().len(),
            duration_ms = apply_start.elapsed().as_millis(),
            "apply complete (dry run)"
        );
        Some(client.submitted().len())
    } else {
        None
    };

    let buckets = summarize_buckets(&loaded.feed);
    let PatchPlan { blog_id, patches } = plan;
    Ok(FixResult {
        source: args.xml.clone(),
        origin: loaded.origin,
        stale_cache: loaded.stale,
        blog_id,
        buckets,
        patches,
        plan_path,
        applied,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectResult> {
    let inspect_span = info_span!("inspect", source = %args.xml.display());
    let _inspect_guard = inspect_span.enter();

    let loaded = load_feed(&args.xml, args.refresh)?;
    Ok(InspectResult {
        source: args.xml.clone(),
        origin: loaded.origin,
        stale_cache: loaded.stale,
        field_count: loaded.feed.len(),
        buckets: summarize_buckets(&loaded.feed),
    })
}

pub fn run_clear_cache(args: &ClearCacheArgs) -> Result<ClearCacheResult> {
    let removed = remove_cached_feed(&args.xml)
        .with_context(|| format!("remove cache for {}", args.xml.display()))?;
    Ok(ClearCacheResult {
        cache_path: cache_path(&args.xml),
        removed,
    })
}
