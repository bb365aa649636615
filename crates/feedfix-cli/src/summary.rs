use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use feedfix_cli::pipeline::{BucketSummary, FeedOrigin};

use crate::types::{ClearCacheResult, FixResult, InspectResult};

pub fn print_fix_summary(result: &FixResult) {
    println!("Source: {}", result.source.display());
    println!("Blog: {}", result.blog_id);
    println!("Feed: {}", origin_label(result.origin, result.stale_cache));
    if let Some(path) = &result.plan_path {
        println!("Plan: {}", path.display());
    }

    if result.patches.is_empty() {
        println!("No entry bodies need patching.");
    } else {
        println!("Patches:");
        for (index, patch) in result.patches.iter().enumerate() {
            println!("{:3}: {} {}", index + 1, patch.kind, patch.id);
        }
    }
    if let Some(count) = result.applied {
        println!("Applied {count} patches (dry run).");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Bucket"),
        header_cell("Entries"),
        header_cell("Labelled"),
        header_cell("Content"),
        header_cell("Patches"),
    ]);
    apply_bucket_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_entries = 0usize;
    let mut total_patches = 0usize;
    for bucket in ordered_buckets(&result.buckets) {
        let patch_count = result
            .patches
            .iter()
            .filter(|patch| patch.kind == bucket.name)
            .count();
        total_entries += bucket.entries;
        total_patches += patch_count;
        table.add_row(vec![
            bucket_cell(&bucket.name),
            Cell::new(bucket.entries),
            Cell::new(bucket.labelled),
            Cell::new(bucket.with_content),
            patch_cell(patch_count),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_entries).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        patch_cell(total_patches).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_inspect_summary(result: &InspectResult) {
    println!("Source: {}", result.source.display());
    println!("Feed: {}", origin_label(result.origin, result.stale_cache));
    println!("Fields: {}", result.field_count);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Bucket"),
        header_cell("Entries"),
        header_cell("Labelled"),
        header_cell("Content"),
    ]);
    apply_bucket_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_entries = 0usize;
    for bucket in ordered_buckets(&result.buckets) {
        total_entries += bucket.entries;
        table.add_row(vec![
            bucket_cell(&bucket.name),
            Cell::new(bucket.entries),
            Cell::new(bucket.labelled),
            Cell::new(bucket.with_content),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_entries).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_clear_cache_summary(result: &ClearCacheResult) {
    if result.removed {
        println!("Removed cache at {}", result.cache_path.display());
    } else {
        println!("No cache sidecar at {}", result.cache_path.display());
    }
}

fn origin_label(origin: FeedOrigin, stale: bool) -> String {
    if stale {
        format!("{origin} (stale, use --refresh to rebuild)")
    } else {
        origin.to_string()
    }
}

fn apply_bucket_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Fixed(24)),
        ColumnConstraint::LowerBoundary(Width::Fixed(7)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::LowerBoundary(Width::Fixed(7)),
        ColumnConstraint::LowerBoundary(Width::Fixed(7)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn ordered_buckets(buckets: &[BucketSummary]) -> Vec<&BucketSummary> {
    let mut ordered: Vec<&BucketSummary> = buckets.iter().collect();
    ordered.sort_by(|a, b| bucket_sort_key(&a.name).cmp(&bucket_sort_key(&b.name)));
    ordered
}

/// Patchable kinds first, drafts last, the rest alphabetical in between.
fn bucket_sort_key(name: &str) -> (u8, String) {
    let rank = match name {
        "page" | "post" => 0,
        "draft" => 2,
        _ => 1,
    };
    (rank, name.to_string())
}

fn bucket_cell(name: &str) -> Cell {
    if name == "draft" {
        Cell::new(format!("  -> {name}")).fg(Color::DarkGrey)
    } else {
        Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold)
    }
}

fn patch_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
