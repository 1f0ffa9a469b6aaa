use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use liquid_core::Expression;
use liquid_core::Result;
use liquid_core::Runtime;
use liquid_core::{
    Display_filter, Filter, FilterParameters, FilterReflection, FromFilterParameters, ParseFilter,
};
use liquid_core::{Error, Value, ValueView};

/// `l_date` — reformat upstream date strings for display.
///
/// Accepts RFC 3339, `%Y-%m-%d %H:%M:%S`, or bare `%Y-%m-%d` input.
/// Unparseable input passes through unchanged so payload oddities render
/// as-is instead of blanking the card.
///
/// `{{ data.published_at | l_date: "%d.%m.%Y" }}` → `07.03.2026`
#[derive(Clone, ParseFilter, FilterReflection)]
#[filter(
    name = "l_date",
    description = "Reformats a date string; format defaults to %Y-%m-%d.",
    parameters(LDateArgs),
    parsed(LDateFilter)
)]
pub struct LDate;

#[derive(Debug, FilterParameters)]
struct LDateArgs {
    #[parameter(description = "strftime output format", arg_type = "str")]
    format: Option<Expression>,
}

#[derive(Debug, FromFilterParameters, Display_filter)]
#[name = "l_date"]
struct LDateFilter {
    #[parameters]
    args: LDateArgs,
}

impl Filter for LDateFilter {
    fn evaluate(&self, input: &dyn ValueView, runtime: &dyn Runtime) -> Result<Value> {
        let args = self.args.evaluate(runtime)?;
        let format = args.format.as_deref().unwrap_or("%Y-%m-%d");

        let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(Error::with_msg("Invalid date format"));
        }

        let text = input.to_kstr();
        let formatted = match parse_date(&text) {
            Some(dt) => dt.format_with_items(items.into_iter()).to_string(),
            None => text.to_string(),
        };
        Ok(Value::scalar(formatted))
    }
}

fn parse_date(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}
