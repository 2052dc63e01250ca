use anyhow::Result;
use chrono::Utc;
use console::style;
use medcenter::model::status;
use medcenter::{
    ingest, AppointmentDraft, AppointmentFilter, AppointmentPatch, AppointmentStore, StoreError,
};
use serde_json::Value;

use super::render::{render_checks, render_list, render_one, CheckReport};
use super::setup::OutputFormat;

pub fn list(
    store: &AppointmentStore,
    skip: usize,
    top: usize,
    filter: &AppointmentFilter,
    output: OutputFormat,
) -> Result<()> {
    let page = store.query(skip, top, filter);
    println!("{}", render_list(&page, output)?);
    Ok(())
}

pub fn get(store: &AppointmentStore, id: &str, output: OutputFormat) -> Result<()> {
    let app = store
        .get_by_id(id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
    println!("{}", render_one(app, output)?);
    Ok(())
}

/// Checks a single JSON record or every element of a JSON array.
pub fn validate(input: &Value, output: OutputFormat) -> Result<()> {
    let reports = check_records(input);
    println!("{}", render_checks(&reports, output)?);
    Ok(())
}

fn check_records(input: &Value) -> Vec<CheckReport> {
    let items: Vec<&Value> = match input.as_array() {
        Some(items) => items.iter().collect(),
        None => vec![input],
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let id = item.get("id").and_then(Value::as_str).map(String::from);
            CheckReport::new(index, id, ingest::check_value(item))
        })
        .collect()
}

/// Runs every store operation once against `store`, printing each outcome.
pub fn demo(store: &mut AppointmentStore) -> Result<()> {
    let text = OutputFormat::Text;
    let all = AppointmentFilter::default();

    section("query: first 5 appointments");
    println!("{}", render_list(&store.query(0, 5, &all), text)?);

    section("query: next 5 appointments");
    println!("{}", render_list(&store.query(5, 5, &all), text)?);

    section("query: status 'Завершен'");
    let completed = AppointmentFilter::by_status(status::COMPLETED);
    println!("{}", render_list(&store.query(0, 5, &completed), text)?);

    section("query: author 'Иванов'");
    let ivanov = AppointmentFilter::by_author("Иванов");
    println!("{}", render_list(&store.query(0, 5, &ivanov), text)?);

    section("get_by_id: '5'");
    show(store, "5")?;

    section("get_by_id: '99'");
    show(store, "99")?;

    let now = Utc::now();
    let valid = AppointmentDraft {
        id: Some("21".into()),
        description: Some("Новый тестовый прием".into()),
        created_at: Some(now),
        author: Some("Тестов Т.Т.".into()),
        patient_id: Some(99),
        doctor_id: Some(100),
        appointment_date: Some(now),
        status: Some(status::SCHEDULED.into()),
        specialization: Some("Терапевт".into()),
        ..Default::default()
    };
    section("insert: valid appointment '21' (expect true)");
    outcome(store.insert(valid));
    show(store, "21")?;

    let invalid = AppointmentDraft {
        id: Some("22".into()),
        description: Some("Невалидный".into()),
        ..Default::default()
    };
    section("insert: incomplete appointment '22' (expect false)");
    outcome(store.insert(invalid));

    section("update: status of '3' (expect true)");
    let held = AppointmentPatch {
        status: Some(Some("Проведен".into())),
        ..Default::default()
    };
    outcome(store.update("3", &held));
    show(store, "3")?;

    section("update: missing '99' (expect false)");
    let broken = AppointmentPatch {
        status: Some(Some("Ошибка".into())),
        ..Default::default()
    };
    outcome(store.update("99", &broken));

    section("remove: '7' (expect true)");
    outcome(store.remove("7"));
    show(store, "7")?;

    section("remove: missing '99' (expect false)");
    outcome(store.remove("99"));

    Ok(())
}

fn section(title: &str) {
    println!();
    println!("{}", style(format!("== {}", title)).bold());
}

fn outcome(ok: bool) {
    println!("{}", ok);
}

fn show(store: &AppointmentStore, id: &str) -> Result<()> {
    match store.get_by_id(id) {
        Some(app) => println!("{}", render_one(app, OutputFormat::Text)?),
        None => println!("not found: {}", id),
    }
    Ok(())
}
