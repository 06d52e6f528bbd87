//! Instrument file loading.
//!
//! Instruments come from a CSV file with a header row:
//!
//! ```text
//! kind,maturity,rate,coupon,frequency,price
//! deposit,0.25,3.00,,,
//! swap,5,3.55,,1,
//! bond,10,,4.00,2,99.25
//! bond,20,,,,46.00
//! ```
//!
//! Rates and coupons are in percent, prices in percent of face. A bond
//! without a rate has its yield solved from the price; a bond without a
//! coupon is a zero-coupon bond. Swaps default to annual payments and coupon
//! bonds to annual coupons. Lines starting with `#` are skipped.

use std::io;
use std::path::Path;

use serde::Deserialize;

use zerocurve_curves::instruments::{InstrumentKind, MarketInstrument};

use crate::error::{CliError, CliResult};

/// One raw CSV row.
#[derive(Debug, Deserialize)]
struct InstrumentRow {
    kind: String,
    maturity: f64,
    #[serde(default)]
    rate: Option<f64>,
    #[serde(default)]
    coupon: Option<f64>,
    #[serde(default)]
    frequency: Option<u32>,
    #[serde(default)]
    price: Option<f64>,
}

/// Loads instruments from a CSV file.
pub fn load_instruments(path: &Path) -> CliResult<Vec<MarketInstrument>> {
    let file = std::fs::File::open(path).map_err(|e| {
        CliError::Io(io::Error::new(
            e.kind(),
            format!("cannot open {}: {e}", path.display()),
        ))
    })?;

    let instruments = parse_instruments(file)?;
    if instruments.is_empty() {
        return Err(CliError::NoInstruments(path.display().to_string()));
    }

    tracing::info!(
        count = instruments.len(),
        path = %path.display(),
        "loaded instruments"
    );
    Ok(instruments)
}

/// Parses instruments from CSV text.
pub fn parse_instruments<R: io::Read>(reader: R) -> CliResult<Vec<MarketInstrument>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut instruments = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);

        let row: InstrumentRow = record.deserialize(Some(&headers)).map_err(|e| {
            CliError::InvalidRow {
                line,
                reason: e.to_string(),
            }
        })?;

        let instrument = row_to_instrument(&row).map_err(|reason| CliError::InvalidRow {
            line,
            reason,
        })?;
        tracing::debug!(line, %instrument, "parsed instrument");
        instruments.push(instrument);
    }

    Ok(instruments)
}

fn row_to_instrument(row: &InstrumentRow) -> Result<MarketInstrument, String> {
    let kind: InstrumentKind = row.kind.parse().map_err(|e| format!("{e}"))?;
    let t = row.maturity;

    let instrument = match kind {
        InstrumentKind::Deposit => {
            let rate = row.rate.ok_or("deposit needs a rate")?;
            MarketInstrument::deposit(t, rate / 100.0)
        }
        InstrumentKind::Swap => {
            let rate = row.rate.ok_or("swap needs a rate")?;
            MarketInstrument::swap(t, rate / 100.0, row.frequency.unwrap_or(1))
        }
        InstrumentKind::Bond => {
            let price = row.price.ok_or("bond needs a price")? / 100.0;
            let coupon = row.coupon.unwrap_or(0.0);

            if coupon == 0.0 && row.rate.is_none() {
                MarketInstrument::zero_coupon_bond(t, price).map_err(|e| e.to_string())?
            } else {
                let freq = row.frequency.unwrap_or(u32::from(coupon > 0.0));
                match row.rate {
                    Some(rate) => MarketInstrument::bond(t, coupon, freq, price, rate / 100.0),
                    None => MarketInstrument::bond_from_price(t, coupon, freq, price)
                        .map_err(|e| e.to_string())?,
                }
            }
        }
    };

    instrument.validate().map_err(|e| e.to_string())?;
    Ok(instrument)
}
