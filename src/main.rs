// Table Timeline inspector
// Loads a snapshot and reports layout, visible range and double bookings

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use table_timeline::models::snapshot::TimelineSnapshot;
use table_timeline::services::conflict::{find_alternative_resources, ConflictService};
use table_timeline::services::settings::SettingsService;
use table_timeline::timeline::{GridExtent, TimelineView, ViewportWindow, Virtualizer};
use table_timeline::utils::date::{format_hour_label, is_slot_aligned};

const DEFAULT_VIEWPORT: (f32, f32) = (1280.0, 720.0);

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(snapshot_path) = args.next().map(PathBuf::from) else {
        bail!("usage: timeline-inspect <snapshot.json> [settings.toml]");
    };
    let settings_service = match args.next() {
        Some(path) => SettingsService::new(path),
        None => SettingsService::from_default_location(),
    };

    let settings = settings_service.load()?;
    let data = std::fs::read_to_string(&snapshot_path)
        .with_context(|| format!("failed to read snapshot {}", snapshot_path.display()))?;
    let snapshot: TimelineSnapshot = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse snapshot {}", snapshot_path.display()))?;

    log::info!(
        "Inspecting {} ({} resources, {} reservations)",
        snapshot_path.display(),
        snapshot.resources.len(),
        snapshot.intervals.len()
    );

    let view = TimelineView::new(&snapshot, &settings);
    let window = settings.window;
    println!(
        "Day {}  {}-{}  {} slots of {} min, {:.0}px each",
        snapshot.reference_day,
        format_hour_label(window.start_hour),
        format_hour_label(window.end_hour),
        window.total_slots(),
        window.slot_minutes,
        view.transform().slot_width()
    );
    if window.wraps_midnight() {
        println!("Closes after midnight, on {}", view.transform().window_end().date());
    }
    let labels: Vec<String> = window.hours().map(format_hour_label).collect();
    println!("Hours {}", labels.join(" "));

    let window_start = view.transform().window_start();
    for interval in &snapshot.intervals {
        if !is_slot_aligned(interval.start, window_start, window.slot_minutes) {
            log::warn!(
                "Reservation {} starts off the slot grid at {}",
                interval.id,
                interval.start.format("%H:%M")
            );
        }
    }

    println!("\nLayout ({:.0}px tall)", view.layout().content_height());
    for header in view.layout().headers() {
        let marker = if header.collapsed { "+" } else { "-" };
        println!("  {} {:<16} y={:.0}", marker, header.group_id, header.y);
        for row in view.layout().rows().iter().filter(|r| r.group_id == header.group_id) {
            println!("      {:<12} y={:.0}", row.resource_id, row.y);
        }
    }

    let mut virtualizer = Virtualizer::from_settings(&settings);
    virtualizer.on_resize(ViewportWindow::new(0.0, 0.0, DEFAULT_VIEWPORT.0, DEFAULT_VIEWPORT.1));
    let range = virtualizer
        .on_frame(&GridExtent::from_view(&view))
        .context("visible range was not computed")?;
    println!(
        "\nInitial viewport renders columns {}..={}, {} rows, {} reservations",
        range.start_col,
        range.end_col,
        range.visible_rows(view.layout()).len(),
        range.visible_intervals(&view).len()
    );

    let service = ConflictService::new(&snapshot.intervals);
    let pairs = service.audit();
    if pairs.is_empty() {
        println!("\nNo double bookings");
        return Ok(());
    }

    println!("\n{} double booking(s)", pairs.len());
    for (first, second) in &pairs {
        let Some(booking) = snapshot.interval(second) else {
            continue;
        };
        println!(
            "  {} overlaps {} on {} at {}",
            second,
            first,
            booking.resource_id,
            booking.start.format("%H:%M")
        );

        let times = service.find_alternative_start_times(
            &booking.resource_id,
            booking.start,
            booking.duration_minutes,
            Some(&booking.id),
        );
        if !times.is_empty() {
            let labels: Vec<String> = times.iter().map(|t| t.format("%H:%M").to_string()).collect();
            println!("    free start times: {}", labels.join(", "));
        }

        let tables: Vec<String> = service
            .find_free_resources(
                &snapshot.resources,
                booking.party_size,
                booking.start,
                booking.end,
                &booking.resource_id,
                Some(&booking.id),
            )
            .iter()
            .map(|r| r.name.clone())
            .collect();
        if tables.is_empty() {
            let any_fit = find_alternative_resources(
                &snapshot.resources,
                booking.party_size,
                &booking.resource_id,
            );
            println!(
                "    no free table at that time ({} other table(s) fit the party)",
                any_fit.len()
            );
        } else {
            println!("    free tables: {}", tables.join(", "));
        }
    }

    Ok(())
}
