use crate::infra::InMemorySubmissionRepository;
use crate::server::load_places;
use chrono::Local;
use clap::Args;
use reform_atlas::catalog::ReformTypeCatalog;
use reform_atlas::error::AppError;
use reform_atlas::places::{AtlasService, PlaceId, PlaceReportCard, PlaceRepository};
use reform_atlas::review::{BillSubmission, ReviewDecision, ReviewService, ReviewVerdict};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Place identifier, e.g. tx/austin
    pub(crate) place: String,
    /// Reform CSV to grade instead of the built-in seed dataset
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
    /// Emit the raw JSON payload instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Reform CSV to grade instead of the built-in seed dataset
    #[arg(long)]
    pub(crate) data: Option<PathBuf>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs { place, data, json } = args;

    let catalog = ReformTypeCatalog::standard();
    let repository = Arc::new(load_places(data.as_deref(), &catalog)?);
    let service = AtlasService::new(repository, catalog);

    let card = service.report_card(&PlaceId(place))?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&card).map_err(std::io::Error::other)?
        );
    } else {
        render_report_card(&card);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { data } = args;
    let today = Local::now().date_naive();

    println!("Reform Atlas demo");

    let catalog = ReformTypeCatalog::standard();
    let repository = Arc::new(load_places(data.as_deref(), &catalog)?);
    let atlas = AtlasService::new(repository.clone(), catalog);

    let snapshots = repository.snapshots()?;
    let Some(first) = snapshots.first() else {
        println!("no places loaded; nothing to grade");
        return Ok(());
    };
    let card = atlas.report_card(&first.place.id)?;
    render_report_card(&card);

    println!("\nReview queue walkthrough");
    let review = ReviewService::new(Arc::new(InMemorySubmissionRepository::default()));
    let record = review.submit(
        BillSubmission {
            place_name: "Denton".to_string(),
            state_code: "TX".to_string(),
            bill_name: "Ordinance 24-1199".to_string(),
            bill_url: "https://example.org/denton/24-1199".to_string(),
            notes: Some("Removes parking minimums near the A-train line".to_string()),
        },
        today,
    )?;
    println!(
        "  submitted {} ({}) as {}",
        record.submission.bill_name, record.submission.place_name, record.short_id.0
    );

    let pending = review.pending(10)?;
    println!("  queue holds {} pending submission(s)", pending.len());

    let decided = review.decide(
        &record.short_id,
        ReviewDecision {
            verdict: ReviewVerdict::Approve,
            note: Some("verified against the city ordinance database".to_string()),
        },
        today,
    )?;
    println!(
        "  {} {} on {}",
        decided.short_id.0,
        decided.status.label(),
        decided.decided_on.map(|d| d.to_string()).unwrap_or_default()
    );

    Ok(())
}

fn render_report_card(card: &PlaceReportCard) {
    println!(
        "\nReport card for {} ({})",
        card.place.name,
        card.place.place_type.label()
    );
    println!(
        "  overall: {:.1} ({})",
        card.report.overall_grade.overall_score,
        card.report.overall_grade.overall_letter_grade.label()
    );
    for grade in &card.report.category_grades {
        println!(
            "  {:<20} {:>6.1} ({})  adopted {}/{}  penalty {}",
            grade.category.label(),
            grade.final_score,
            grade.letter_grade.label(),
            grade.reforms_adopted_count,
            grade.total_possible_reforms,
            grade.limitations_penalty
        );
    }
    println!(
        "  percentiles: state {:.0} / region {:.0} / national {:.0}",
        card.report.comparisons.state_percentile,
        card.report.comparisons.region_percentile,
        card.report.comparisons.national_percentile
    );
    if card.report.todo_items.is_empty() {
        println!("  no missing-reform suggestions from peers");
    } else {
        println!("  peers suggest:");
        for item in &card.report.todo_items {
            println!(
                "    {} ({}) adopted by {} peer(s)",
                item.reform_name, item.reform_code, item.adoption_count
            );
        }
    }
}
