//! Currency conversion tool

use crate::tool::{ToolContext, ToolError};
use crate::types::{round_to, Answer, CurrencyArgs};

pub fn handle(args: &CurrencyArgs, ctx: &mut ToolContext<'_>) -> Result<Answer, ToolError> {
    let amount = match args.amount {
        Some(amount) => amount,
        None => {
            let deferred = ctx.working_set.last_number().ok_or_else(|| {
                ToolError::Domain("no amount given and no previous result to convert".to_string())
            })?;
            tracing::debug!(amount = deferred, "using previous result as amount");
            deferred
        }
    };

    let from = args.from_currency.as_str();
    let to = args.to_currency.as_str();

    let result = if from.eq_ignore_ascii_case(to) {
        round_to(amount, 2)
    } else {
        match ctx.reference.fx_rate(from, to) {
            Some(rate) => round_to(amount * rate, 2),
            None => {
                tracing::warn!(from, to, "no exchange rate for currency pair");
                0.0
            }
        }
    };

    tracing::info!(amount, from, to, result, "currency converted");
    ctx.working_set.set_last_conversion(result);
    Ok(Answer::Number(result))
}
