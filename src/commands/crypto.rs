use super::fetch_json;
use crate::command::{Category, Command, CommandResult};
use crate::context::TerminalContext;
use crate::output::{DeferredOutput, OutputLine};
use serde::Deserialize;

/// crypto
/// Bitcoin and Ethereum spot prices in USD from coingecko.
pub struct CryptoCommand;

#[derive(Debug, Deserialize)]
struct Prices {
    bitcoin: UsdPrice,
    ethereum: UsdPrice,
}

#[derive(Debug, Deserialize)]
struct UsdPrice {
    usd: f64,
}

impl Command for CryptoCommand {
    fn usage(&self) -> &'static str {
        "crypto"
    }

    fn summary(&self) -> &'static str {
        "Bitcoin & Ethereum prices"
    }

    fn category(&self) -> Category {
        Category::Network
    }

    fn execute(&self, _args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        fetch_json(ctx, &ctx.config.apis.crypto, "Fetching crypto prices...", "crypto prices", |p: Prices| {
            Ok(DeferredOutput::lines(vec![
                OutputLine::blank(),
                OutputLine::success("💰 Cryptocurrency Prices"),
                OutputLine::plain(format!("   Bitcoin: ${}", group_thousands(p.bitcoin.usd))),
                OutputLine::plain(format!("   Ethereum: ${}", group_thousands(p.ethereum.usd))),
                OutputLine::blank(),
            ]))
        })
    }
}

/// `97123.456` -> `97,123.456`. At most three fraction digits, trailing
/// zeros dropped.
pub(crate) fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.3}", value.abs());
    let (whole, frac) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && (whole != "0" || !frac.is_empty()) { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Outcome;
    use crate::commands::testing::context_with;
    use futures::executor::block_on;

    const URL: &str = "https://api.coingecko.com/api/v3/simple/price?ids=bitcoin,ethereum&vs_currencies=usd";

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(97123.0), "97,123");
        assert_eq!(group_thousands(1234567.5), "1,234,567.5");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(3412.129), "3,412.129");
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(-1500.0), "-1,500");
    }

    #[test]
    fn test_crypto_prices() {
        let body = r#"{"bitcoin":{"usd":97123},"ethereum":{"usd":3412.5}}"#;
        let mut ctx = context_with(&[(URL, body)]);
        let out = match CryptoCommand.execute(&[], &mut ctx).unwrap() {
            Outcome::Deferred { pending, .. } => block_on(pending).unwrap(),
            _ => panic!("crypto is deferred"),
        };
        assert_eq!(out.lines[2].text, "   Bitcoin: $97,123");
        assert_eq!(out.lines[3].text, "   Ethereum: $3,412.5");
    }
}
