use liquid_core::Expression;
use liquid_core::Result;
use liquid_core::Runtime;
use liquid_core::{
    Display_filter, Filter, FilterParameters, FilterReflection, FromFilterParameters, ParseFilter,
};
use liquid_core::{Error, Value, ValueView};

/// `number_with_delimiter` — thousands separators for display counters.
///
/// `{{ 1234567 | number_with_delimiter }}` → `1,234,567`
#[derive(Clone, ParseFilter, FilterReflection)]
#[filter(
    name = "number_with_delimiter",
    description = "Formats a number with comma thousands separators.",
    parsed(NumberWithDelimiterFilter)
)]
pub struct NumberWithDelimiter;

#[derive(Debug, Default, Display_filter)]
#[name = "number_with_delimiter"]
struct NumberWithDelimiterFilter;

impl Filter for NumberWithDelimiterFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> Result<Value> {
        let scalar = input
            .as_scalar()
            .ok_or_else(|| Error::with_msg("Number expected"))?;

        if let Some(int) = scalar.to_integer() {
            return Ok(Value::scalar(delimit_signed(int)));
        }
        if let Some(float) = scalar.to_float() {
            return Ok(Value::scalar(delimit_float(float)));
        }
        Err(Error::with_msg("Number expected"))
    }
}

/// `number_to_currency` — currency formatting with an optional unit.
///
/// `{{ 1234.5 | number_to_currency }}` → `$1,234.50`
/// `{{ 1234.5 | number_to_currency: "€" }}` → `€1,234.50`
#[derive(Clone, ParseFilter, FilterReflection)]
#[filter(
    name = "number_to_currency",
    description = "Formats a number as currency; unit defaults to $.",
    parameters(NumberToCurrencyArgs),
    parsed(NumberToCurrencyFilter)
)]
pub struct NumberToCurrency;

#[derive(Debug, FilterParameters)]
struct NumberToCurrencyArgs {
    #[parameter(description = "currency unit symbol", arg_type = "str")]
    unit: Option<Expression>,
}

#[derive(Debug, FromFilterParameters, Display_filter)]
#[name = "number_to_currency"]
struct NumberToCurrencyFilter {
    #[parameters]
    args: NumberToCurrencyArgs,
}

impl Filter for NumberToCurrencyFilter {
    fn evaluate(&self, input: &dyn ValueView, runtime: &dyn Runtime) -> Result<Value> {
        let args = self.args.evaluate(runtime)?;
        let unit = args.unit.as_deref().unwrap_or("$");

        let scalar = input
            .as_scalar()
            .ok_or_else(|| Error::with_msg("Number expected"))?;
        let amount = scalar
            .to_float()
            .or_else(|| scalar.to_integer().map(|i| i as f64))
            .ok_or_else(|| Error::with_msg("Number expected"))?;

        let sign = if amount < 0.0 { "-" } else { "" };
        let cents = format!("{:.2}", amount.abs());
        let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
        Ok(Value::scalar(format!(
            "{sign}{unit}{}.{frac}",
            delimit_digits(whole)
        )))
    }
}

fn delimit_signed(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}", delimit_digits(&digits))
}

fn delimit_float(value: f64) -> String {
    let text = value.abs().to_string();
    let sign = if value < 0.0 { "-" } else { "" };
    match text.split_once('.') {
        Some((whole, frac)) => format!("{sign}{}.{frac}", delimit_digits(whole)),
        None => format!("{sign}{}", delimit_digits(&text)),
    }
}

fn delimit_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
