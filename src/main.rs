//! Offer Bot entry point.
//!
//! Batch driver over a saved listing page:
//! 1. Site identification + listing-page gate
//! 2. Extraction → reconciliation → recommended terms
//! 3. Offer computation + appraisal assessment
//! 4. Report + offer message, one journal event per analysis

mod config;

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use clap::Parser;
use common::money::{format_currency, format_monthly};
use common::{DealState, ScrapedFacts, SiteId};
use listing_scrape::site::hostname_of;
use listing_scrape::{extract, identify_site, is_listing_page, HtmlPage, ListingPage, TextPage};
use offer_strategy::{
    apply_recommended_terms, assess_appraisal, compute_offer, generate_offer_message, reconcile,
    validate, AppraisalAssessment, OfferPolicy, OfferSummary,
};
use serde_json::json;
use tracing::{error, info, warn};

use crate::config::{load_config, OfferBotConfig};

#[derive(Parser)]
#[command(about = "Derive a seller-financing offer from a saved listing page")]
struct Cli {
    /// Listing URL, used for site identification and the listing-page gate.
    #[arg(long)]
    url: String,

    /// Saved page capture. `.html`/`.htm` is parsed as markup, anything
    /// else as plain page text.
    #[arg(long)]
    page: PathBuf,

    /// Print only the offer message.
    #[arg(long)]
    message_only: bool,

    /// Keep the current terms instead of applying tier-recommended ones.
    #[arg(long)]
    no_recommend: bool,

    /// Override the extracted list price.
    #[arg(long)]
    list_price: Option<f64>,

    /// Override the extracted days on market (re-derives recommended terms).
    #[arg(long)]
    days_on_market: Option<u32>,

    /// Offer price as a percent of list, [85, 105].
    #[arg(long)]
    offer_percent: Option<f64>,

    /// Down payment as a percent of the offer price, [3, 30].
    #[arg(long)]
    down_percent: Option<f64>,

    /// Annual interest rate in percent, [2, 10] in 0.25 steps.
    #[arg(long)]
    rate: Option<f64>,

    /// Amortization term: 15, 20, 25, or 30 years.
    #[arg(long)]
    term_years: Option<u32>,

    /// Balloon horizon: 0 (none), 3, 5, 7, or 10 years.
    #[arg(long)]
    balloon_years: Option<u32>,
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn resolve_repo_root() -> Option<PathBuf> {
    let mut cursor = std::env::current_dir().ok()?;
    loop {
        if cursor.join(".git").is_dir() {
            return Some(cursor);
        }
        if !cursor.pop() {
            return None;
        }
    }
}

fn resolve_journal_dir(cfg: &OfferBotConfig) -> PathBuf {
    if !cfg.journal_dir.is_empty() {
        return PathBuf::from(&cfg.journal_dir);
    }
    if let Some(root) = resolve_repo_root() {
        return root.join("ANALYSES");
    }
    PathBuf::from("ANALYSES")
}

/// Append-only journal of analysis events, one JSONL file per day.
struct AnalysisJournal {
    dir: PathBuf,
    day_key: String,
    file: File,
}

impl AnalysisJournal {
    fn open(dir: PathBuf) -> std::io::Result<Self> {
        create_dir_all(&dir)?;
        let day_key = Utc::now().format("%Y-%m-%d").to_string();
        let file = Self::open_day_file(&dir, &day_key)?;
        Ok(Self { dir, day_key, file })
    }

    fn open_day_file(dir: &Path, day_key: &str) -> std::io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("analyses-{}.jsonl", day_key)))
    }

    fn rotate_if_needed(&mut self) -> std::io::Result<()> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        if today != self.day_key {
            self.file = Self::open_day_file(&self.dir, &today)?;
            self.day_key = today;
        }
        Ok(())
    }

    fn write_event(&mut self, event: serde_json::Value) {
        let write_result = (|| -> std::io::Result<()> {
            self.rotate_if_needed()?;
            let line = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
            writeln!(self.file, "{}", line)?;
            self.file.flush()?;
            Ok(())
        })();

        if let Err(e) = write_result {
            warn!("Analysis journal write failed: {}", e);
        }
    }
}

/// Apply CLI overrides on top of the reconciled state, then validate
/// the documented ranges. A committed days-on-market edit re-derives
/// the recommended terms; explicit term overrides win over those.
fn apply_overrides(state: &mut DealState, cli: &Cli, policy: &OfferPolicy) -> common::Result<()> {
    if let Some(price) = cli.list_price {
        state.list_price = price;
    }
    if let Some(days) = cli.days_on_market {
        state.days_on_market = days;
        if !cli.no_recommend {
            apply_recommended_terms(state, policy);
        }
    }
    if let Some(percent) = cli.offer_percent {
        state.offer_price_percent = percent;
    }
    if let Some(percent) = cli.down_percent {
        state.down_payment_percent = percent;
    }
    if let Some(rate) = cli.rate {
        state.interest_rate = rate;
    }
    if let Some(term) = cli.term_years {
        state.loan_term_years = term;
    }
    if let Some(balloon) = cli.balloon_years {
        state.balloon_years = balloon;
    }
    validate(state)
}

fn scraped_tag(scraped: Option<f64>) -> &'static str {
    if scraped.is_some() {
        ""
    } else {
        " (estimated)"
    }
}

fn print_report(
    site: SiteId,
    state: &DealState,
    facts: &ScrapedFacts,
    summary: &OfferSummary,
    appraisal: Option<&AppraisalAssessment>,
) {
    println!("Site: {}", site.display_name());
    println!();
    println!("Property");
    println!("  List price:        {}", format_currency(state.list_price));
    println!(
        "  Days on market:    {} (seller motivation: {})",
        state.days_on_market, summary.motivation_label
    );
    println!(
        "  Annual taxes:      {}{}",
        format_currency(state.annual_taxes),
        scraped_tag(facts.annual_taxes)
    );
    println!(
        "  Annual insurance:  {}{}",
        format_currency(state.annual_insurance),
        scraped_tag(facts.annual_insurance)
    );
    println!("  Monthly HOA:       {}", format_currency(state.monthly_hoa));

    if let Some(a) = appraisal {
        let source = state.estimate_source.as_deref().unwrap_or("Estimate");
        let sign = if a.percent_diff >= 0.0 { "+" } else { "-" };
        println!();
        println!("Appraisal check");
        println!("  {} {}", a.icon, a.status);
        println!("  List price:        {}", format_currency(a.list_price));
        println!("  {:<18} {}", format!("{source}:"), format_currency(a.estimate));
        println!(
            "  Difference:        {}{:.1}% ({})",
            sign,
            a.percent_diff.abs(),
            format_currency(a.difference.abs())
        );
        println!("  {}", a.risk.note());
    }

    println!();
    println!("Offer ({}% of list)", state.offer_price_percent);
    println!("  Offer price:       {}", format_currency(summary.offer_price));
    println!(
        "  Down payment:      {} ({}%)",
        format_currency(summary.down_payment),
        state.down_payment_percent
    );
    println!("  Loan amount:       {}", format_currency(summary.loan_amount));
    println!(
        "  Rate / term:       {}% / {} years",
        state.interest_rate, state.loan_term_years
    );
    if state.balloon_years > 0 {
        println!(
            "  Balloon due:       {} years ({})",
            state.balloon_years,
            format_currency(summary.balloon_payment)
        );
    }
    println!();
    println!("Monthly payment breakdown");
    println!("  Principal & interest:  {}", format_monthly(summary.monthly_pi));
    println!("  Property taxes:        {}", format_monthly(summary.monthly_taxes));
    println!("  Insurance:             {}", format_monthly(summary.monthly_insurance));
    if summary.monthly_hoa > 0.0 {
        println!("  HOA:                   {}", format_monthly(summary.monthly_hoa));
    }
    println!("  Total PITI:            {}", format_monthly(summary.total_piti));
    println!();
    let commission_pct = summary.traditional_commission / state.list_price * 100.0;
    println!("Seller comparison");
    println!(
        "  Traditional sale ({:.0}% commission), net: {}",
        commission_pct,
        format_currency(summary.traditional_net)
    );
    println!(
        "  This offer, net at close:               {}",
        format_currency(summary.seller_net_at_close)
    );
    println!(
        "  {} down - {} commission = {} net + {}/mo",
        format_currency(summary.down_payment),
        format_currency(summary.traditional_commission),
        format_currency(summary.seller_net_at_close),
        format_monthly(summary.monthly_pi)
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "offer_bot=info,offer_strategy=info,listing_scrape=info".into()
            }),
        )
        .init();

    let cli = Cli::parse();
    let cfg = match load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Config error: {}", e);
            return;
        }
    };

    let hostname = hostname_of(&cli.url);
    let Some(site) = identify_site(hostname) else {
        info!("Unrecognized site {:?} — nothing to do", hostname);
        return;
    };
    if !is_listing_page(site, &cli.url) {
        info!(
            "{}: not a listing detail page, skipping. URL: {}",
            site.display_name(),
            cli.url
        );
        return;
    }

    let raw = match std::fs::read_to_string(&cli.page) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to read {}: {}", cli.page.display(), e);
            return;
        }
    };

    let is_html = cli
        .page
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("html") || e.eq_ignore_ascii_case("htm"));
    let page: Box<dyn ListingPage> = if is_html {
        Box::new(HtmlPage::parse(&raw))
    } else {
        Box::new(TextPage::new(raw))
    };

    let facts = extract(site, page.as_ref());
    if facts.is_empty() {
        warn!(
            "{}: nothing extracted from the page; proceeding with defaults",
            site.display_name()
        );
    } else {
        info!("{}: extracted {:?}", site.display_name(), facts);
    }

    let mut state = DealState::default();
    reconcile(&mut state, &facts, &cfg.policy.costs);
    if !cli.no_recommend {
        apply_recommended_terms(&mut state, &cfg.policy);
    }

    if let Err(e) = apply_overrides(&mut state, &cli, &cfg.policy) {
        error!("{}", e);
        return;
    }

    let summary = compute_offer(&state, &cfg.policy);
    let appraisal = assess_appraisal(state.list_price, state.estimate);
    let message = generate_offer_message(&state, &summary);

    if cli.message_only {
        println!("{message}");
    } else {
        print_report(site, &state, &facts, &summary, appraisal.as_ref());
        println!();
        println!("{message}");
    }

    match AnalysisJournal::open(resolve_journal_dir(&cfg)) {
        Ok(mut journal) => journal.write_event(json!({
            "ts": now_iso(),
            "kind": "analysis",
            "site": site.as_str(),
            "url": cli.url,
            "facts": serde_json::to_value(&facts).unwrap_or_default(),
            "offer": {
                "offer_price": summary.offer_price,
                "down_payment": summary.down_payment,
                "loan_amount": summary.loan_amount,
                "monthly_pi": summary.monthly_pi,
                "total_piti": summary.total_piti,
                "balloon_payment": summary.balloon_payment,
                "seller_net_at_close": summary.seller_net_at_close,
            },
            "motivation": summary.motivation.as_str(),
            "appraisal": appraisal.as_ref().map(|a| json!({
                "risk": serde_json::to_value(a.risk).unwrap_or_default(),
                "status": a.status,
                "percent_diff": a.percent_diff,
            })),
        })),
        Err(e) => warn!("Failed to open analysis journal: {}", e),
    }
}
