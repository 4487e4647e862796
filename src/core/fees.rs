//! Fee calculation
//!
//! Derives the insurance fee and its platform/seller split from a transaction
//! amount. Decimal arithmetic keeps `platform_fee + seller_share` exactly equal
//! to `insurance_fee`.

use crate::types::Fees;
use rust_decimal::Decimal;

/// Insurance fee rate applied to every transaction (2%)
pub const INSURANCE_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Platform's share of the insurance fee (25%)
pub const PLATFORM_SHARE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Seller's share of the insurance fee (75%)
pub const SELLER_SHARE: Decimal = Decimal::from_parts(75, 0, 0, false, 2);

/// Compute the fee breakdown for an amount
///
/// Pure function; amounts are validated upstream.
pub fn compute_fees(amount: Decimal) -> Fees {
    let insurance_fee = amount * INSURANCE_RATE;

    Fees {
        insurance_fee,
        platform_fee: insurance_fee * PLATFORM_SHARE,
        seller_share: insurance_fee * SELLER_SHARE,
    }
}
