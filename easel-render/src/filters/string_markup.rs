use liquid_core::Expression;
use liquid_core::Result;
use liquid_core::Runtime;
use liquid_core::{
    Display_filter, Filter, FilterParameters, FilterReflection, FromFilterParameters, ParseFilter,
};
use liquid_core::{Error, Value, ValueView};

/// `pluralize` — count-aware labels for list headers and badges.
///
/// `{{ 3 | pluralize: "item" }}` → `3 items`
/// `{{ 1 | pluralize: "entry", "entries" }}` → `1 entry`
#[derive(Clone, ParseFilter, FilterReflection)]
#[filter(
    name = "pluralize",
    description = "Renders a count with its singular or plural noun.",
    parameters(PluralizeArgs),
    parsed(PluralizeFilter)
)]
pub struct Pluralize;

#[derive(Debug, FilterParameters)]
struct PluralizeArgs {
    #[parameter(description = "singular noun", arg_type = "str")]
    singular: Expression,
    #[parameter(description = "plural noun; defaults to singular + \"s\"", arg_type = "str")]
    plural: Option<Expression>,
}

#[derive(Debug, FromFilterParameters, Display_filter)]
#[name = "pluralize"]
struct PluralizeFilter {
    #[parameters]
    args: PluralizeArgs,
}

impl Filter for PluralizeFilter {
    fn evaluate(&self, input: &dyn ValueView, runtime: &dyn Runtime) -> Result<Value> {
        let args = self.args.evaluate(runtime)?;
        let count = input
            .as_scalar()
            .and_then(|s| s.to_integer())
            .ok_or_else(|| Error::with_msg("Whole number expected"))?;

        let word = if count == 1 {
            args.singular.to_string()
        } else {
            match args.plural.as_deref() {
                Some(plural) => plural.to_string(),
                None => format!("{}s", args.singular),
            }
        };
        Ok(Value::scalar(format!("{count} {word}")))
    }
}

/// `titleize` — uppercase the first letter of each word.
#[derive(Clone, ParseFilter, FilterReflection)]
#[filter(
    name = "titleize",
    description = "Capitalizes each whitespace-separated word.",
    parsed(TitleizeFilter)
)]
pub struct Titleize;

#[derive(Debug, Default, Display_filter)]
#[name = "titleize"]
struct TitleizeFilter;

impl Filter for TitleizeFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> Result<Value> {
        let text = input.to_kstr();
        let mut out = String::with_capacity(text.len());
        for (i, word) in text.split(' ').enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
        Ok(Value::scalar(out))
    }
}
