//! Text and JSON rendering of query results.

use crate::{Format, sector_code};
use gics::{Classification, Equity, Gics, HierarchyLevel};
use gics_data::FundamentalsRecord;
use serde::Serialize;
use serde_json::{Value, json};

type Result = std::result::Result<(), serde_json::Error>;

/// Number of payload fields shown per record in text output.
const TEXT_FIELDS: usize = 12;

pub(crate) fn json<T: Serialize + ?Sized>(value: &T) -> Result {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn classification(gics: &Gics, c: &Classification, format: Format) -> Result {
    let table = gics.taxonomy();
    let group = c.industry_group(&table);

    match format {
        Format::Json => json(&json!({
            "sector": c.sector(),
            "industry_group": group,
            "industry": c.industry(),
            "sub_industry": c.sub_industry(),
        })),
        Format::Text => {
            println!("Sector:          {}", c.sector());
            println!("Industry Group:  {}", group.unwrap_or("-"));
            println!("Industry:        {}", c.industry().unwrap_or("-"));
            println!("Sub-Industry:    {}", c.sub_industry().unwrap_or("-"));
            Ok(())
        }
    }
}

pub(crate) fn equities(equities: &[Equity], format: Format) -> Result {
    if format == Format::Json {
        return json(equities);
    }

    for equity in equities {
        println!("{:6} {}", equity.symbol, equity.display_name());
        println!("       {}", equity.classification);
    }
    Ok(())
}

pub(crate) fn peers(
    gics: &Gics,
    equity: &Equity,
    level: HierarchyLevel,
    peers: &[String],
    format: Format,
) -> Result {
    let value = level.value_of(&equity.classification);

    if format == Format::Json {
        return json(&json!({
            "symbol": equity.symbol,
            "level": level,
            "value": value,
            "peers": peers,
        }));
    }

    println!(
        "{} peers of {} ({}): {}",
        level,
        equity.display_name(),
        value.unwrap_or("-"),
        peers.len()
    );
    for peer in peers {
        match gics.names().get(peer) {
            Some(name) => println!("  {:6} {}", peer, name),
            None => println!("  {}", peer),
        }
    }
    Ok(())
}

pub(crate) fn sectors(gics: &Gics, format: Format) -> Result {
    let table = gics.taxonomy();
    let counts = gics.constituents().sector_counts();
    let count = |sector: &str| counts.get(sector).copied().unwrap_or(0);

    if format == Format::Json {
        let sectors: Vec<Value> = table
            .sectors()
            .iter()
            .map(|s| {
                json!({
                    "code": sector_code(s),
                    "name": s,
                    "industries": table.industries_in(s).len(),
                    "constituents": count(s.as_str()),
                })
            })
            .collect();
        return json(&sectors);
    }

    println!("GICS Sectors:");
    println!("=============\n");
    for sector in table.sectors() {
        let code = sector_code(sector).map_or_else(|| "--".to_string(), |c| c.to_string());
        println!("{:>2} - {:30} {:3} stocks", code, sector, count(sector.as_str()));
    }
    println!("\nTotal constituents: {}", gics.constituents().len());
    Ok(())
}

pub(crate) fn sector_tree(gics: &Gics, sector: &str, format: Format) -> Result {
    let table = gics.taxonomy();
    let members = |sub_industry: &str| {
        gics.constituents()
            .iter()
            .filter(|c| c.sub_industry == sub_industry)
            .map(|c| c.symbol.as_str())
            .collect::<Vec<_>>()
    };

    if format == Format::Json {
        let industries: Vec<Value> = table
            .industries_in(sector)
            .into_iter()
            .map(|industry| {
                let subs: Vec<Value> = table
                    .sub_industries_in(industry)
                    .into_iter()
                    .map(|sub| json!({ "name": sub, "constituents": members(sub) }))
                    .collect();
                json!({
                    "name": industry,
                    "industry_group": table.industry_group_of(industry),
                    "sub_industries": subs,
                })
            })
            .collect();
        return json(&json!({ "sector": sector, "industries": industries }));
    }

    println!("{}", sector);
    println!("{}\n", "=".repeat(sector.len()));
    for industry in table.industries_in(sector) {
        println!("{}", industry);
        for sub in table.sub_industries_in(industry) {
            let symbols = members(sub);
            if symbols.is_empty() {
                println!("  {}", sub);
            } else {
                println!("  {} [{}]", sub, symbols.join(", "));
            }
        }
    }
    Ok(())
}

pub(crate) fn fundamentals(source: &str, records: &[FundamentalsRecord], format: Format) -> Result {
    if format == Format::Json {
        return json(records);
    }

    for record in records {
        println!(
            "{} {} ({}, {})",
            record.symbol,
            record.statement,
            source,
            record.fetched_at.format("%Y-%m-%d %H:%M UTC")
        );

        // FMP returns an array of periods, most recent first.
        let (latest, earlier) = match &record.payload {
            Value::Array(rows) => (rows.first(), rows.len().saturating_sub(1)),
            other => (Some(other), 0),
        };
        if let Some(Value::Object(fields)) = latest {
            for (key, value) in fields.iter().take(TEXT_FIELDS) {
                println!("  {:28} {}", key, scalar(value));
            }
            if fields.len() > TEXT_FIELDS {
                println!("  ... {} more fields", fields.len() - TEXT_FIELDS);
            }
        }
        if earlier > 0 {
            println!("  (+{} earlier periods)", earlier);
        }
        println!();
    }
    Ok(())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
