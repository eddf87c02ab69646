//! Rendering of search state to terminal text.
//!
//! Mirrors the display rules of the search view: the loading line, the
//! error line, the result table, and the first-run tip are independent
//! conditions, so an error can sit next to the previous result.

use forecast_core::{DailyForecast, ForecastResult, SearchState};
use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

const TITLE: &str = "7-Day Weather Forecast • 7 రోజుల వాతావరణం";

const TIP: &str = "Tip: Search for your town or village.\n\
                   సూచన: మీ పట్టణం లేదా ఊరు వెతకండి.";

pub fn title_banner(no_color: bool) -> String {
    if no_color { TITLE.to_string() } else { format!("{}", TITLE.bold()) }
}

pub fn loading_line(no_color: bool) -> String {
    if no_color { "Loading...".to_string() } else { format!("{}", "Loading...".blue()) }
}

/// Render everything the state calls for, in display order.
pub fn render_state(state: &SearchState, no_color: bool) -> String {
    let mut out = String::new();

    if state.loading {
        out.push_str(&loading_line(no_color));
        out.push('\n');
    }

    if let Some(error) = &state.error {
        if no_color {
            out.push_str(error);
        } else {
            out.push_str(&format!("{}", error.red().bold()));
        }
        out.push('\n');
    }

    match &state.result {
        Some(result) => out.push_str(&render_result(result, no_color)),
        None => {
            out.push_str(TIP);
            out.push('\n');
        }
    }

    out
}

/// Location heading plus the one-row-per-day table.
pub fn render_result(result: &ForecastResult, no_color: bool) -> String {
    let heading = if no_color {
        result.location.clone()
    } else {
        format!("{}", result.location.cyan().bold())
    };

    let mut builder = Builder::default();
    builder.push_record([
        "Date / తేదీ",
        "Rain (mm) / వర్షం",
        "Chance % / అవకాశం",
        "Rain? / వర్షం?",
        "Max °C / గరిష్టం",
        "Min °C / కనిష్టం",
    ]);

    for day in &result.days {
        builder.push_record([
            day.date.to_string(),
            format!("{:.1}", day.precipitation_mm),
            format!("{}%", day.rain_chance_pct),
            rain_label(day, no_color),
            format!("{:.1}", day.temp_max_c),
            format!("{:.1}", day.temp_min_c),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::sharp());

    format!("{heading}\n{table}\n")
}

fn rain_label(day: &DailyForecast, no_color: bool) -> String {
    let text = if day.will_rain() { "Yes / అవును" } else { "No / లేదు" };

    if no_color {
        text.to_string()
    } else if day.will_rain() {
        format!("{}", text.green().bold())
    } else {
        format!("{}", text.red().bold())
    }
}
