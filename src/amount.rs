use crate::error::InvalidInput;
use ethers::types::U256;
use ethers::utils::parse_units;
use rust_decimal::Decimal;

/// Decimals of the chain's native unit (wei per ether).
pub const NATIVE_DECIMALS: u32 = 18;

/// Scales a human amount (in ether) to base units.
pub fn to_base_units(amount: Decimal) -> Result<U256, InvalidInput> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(InvalidInput::InvalidAmount(format!("{amount} is negative")));
    }

    let amount = amount.normalize();
    if amount.scale() > NATIVE_DECIMALS {
        return Err(InvalidInput::InvalidAmount(format!(
            "{amount} has more than {NATIVE_DECIMALS} fractional digits"
        )));
    }

    parse_ether_text(&amount.to_string())
}

/// Parses and scales a textual amount such as `"1.5"`.
pub fn parse_base_units(amount: &str) -> Result<U256, InvalidInput> {
    let amount = amount.trim();
    if amount.is_empty() || amount == "." {
        return Err(InvalidInput::InvalidAmount("empty amount".to_string()));
    }
    if amount.starts_with('-') {
        return Err(InvalidInput::InvalidAmount(format!("{amount} is negative")));
    }
    // parse_units truncates past the unit's decimals instead of failing
    if let Some((_, fraction)) = amount.split_once('.') {
        if fraction.trim_end_matches('0').len() > NATIVE_DECIMALS as usize {
            return Err(InvalidInput::InvalidAmount(format!(
                "{amount} has more than {NATIVE_DECIMALS} fractional digits"
            )));
        }
    }

    parse_ether_text(amount)
}

fn parse_ether_text(amount: &str) -> Result<U256, InvalidInput> {
    parse_units(amount, NATIVE_DECIMALS)
        .map(U256::from)
        .map_err(|e| InvalidInput::InvalidAmount(format!("{amount}: {e}")))
}
