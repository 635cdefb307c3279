use ethers::{
    types::{Address, U256},
    utils::{format_units, to_checksum},
};

const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;
const ADDRESS_HEX_LEN: usize = 40;

/// Parses `0x` followed by 40 hex characters. All-lowercase input is accepted
/// as is; any other casing must match the EIP-55 checksum.
pub fn parse_address(candidate: &str) -> Option<Address> {
    let body = candidate.strip_prefix("0x")?;
    if body.len() != ADDRESS_HEX_LEN {
        return None;
    }
    let address = Address::from_slice(&hex::decode(body).ok()?);
    if candidate == candidate.to_lowercase() || to_checksum(&address, None) == candidate {
        Some(address)
    } else {
        None
    }
}

pub fn is_valid_address(candidate: &str) -> bool {
    parse_address(candidate).is_some()
}

/// Exact decimal rendering of a wei amount in ether, trailing zeros trimmed.
pub fn format_ether_exact(wei: U256) -> String {
    let (whole, fraction) = wei.div_mod(U256::from(WEI_PER_ETHER));
    if fraction.is_zero() {
        return whole.to_string();
    }
    let fraction = format!("{:0>18}", fraction.to_string());
    format!("{whole}.{}", fraction.trim_end_matches('0'))
}

/// Approximate gwei value with three decimals. Goes through `f64`, so it is
/// for display only.
pub fn format_gwei_approx(wei: U256) -> String {
    match format_units(wei, "gwei").map(|units| units.parse::<f64>()) {
        Ok(Ok(gwei)) if gwei.is_finite() => format!("{gwei:.3}"),
        _ => wei.to_string(),
    }
}

/// `0x1234...abcd`
pub fn short_address(address: &str) -> String {
    let head: String = address.chars().take(6).collect();
    let tail_len = address.chars().count().saturating_sub(4);
    let tail: String = address.chars().skip(tail_len).collect();
    format!("{head}...{tail}")
}

pub fn checksummed(address: &Address) -> String {
    to_checksum(address, None)
}
