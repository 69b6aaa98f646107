//! Home-currency conversion.

use rust_decimal::Decimal;

use crate::types::{Currency, ExchangeRates, Money};

/// Convert an amount in `currency` to KRW using the supplied rate table.
///
/// KRW amounts pass through untouched regardless of the table. A missing or
/// non-positive rate yields zero rather than an error; validation rejects
/// such portfolios before any calculation runs. No rounding happens at this
/// layer.
pub fn convert_to_krw(amount: Money, currency: Currency, rates: &ExchangeRates) -> Money {
    if currency.is_home() {
        return amount;
    }

    match rates.rate(currency) {
        Some(rate) if rate > Decimal::ZERO => amount * rate,
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd(rate: Decimal) -> ExchangeRates {
        ExchangeRates::from_iter([(Currency::USD, rate)])
    }

    #[test]
    fn test_home_currency_ignores_rate_table() {
        assert_eq!(convert_to_krw(dec!(1000), Currency::KRW, &usd(dec!(1))), dec!(1000));
        assert_eq!(convert_to_krw(dec!(1000), Currency::KRW, &usd(dec!(1300))), dec!(1000));
        assert_eq!(convert_to_krw(dec!(99.99), Currency::KRW, &usd(dec!(1))), dec!(99.99));
    }

    #[test]
    fn test_foreign_currency_applies_rate() {
        assert_eq!(convert_to_krw(dec!(1000), Currency::USD, &usd(dec!(1))), dec!(1000));
        assert_eq!(convert_to_krw(dec!(1000), Currency::USD, &usd(dec!(1.2))), dec!(1200));
        assert_eq!(convert_to_krw(dec!(100), Currency::USD, &usd(dec!(1300))), dec!(130000));
        assert_eq!(convert_to_krw(dec!(50.5), Currency::USD, &usd(dec!(1300))), dec!(65650));
        assert_eq!(convert_to_krw(dec!(1000), Currency::USD, &usd(dec!(0.5))), dec!(500));
    }

    #[test]
    fn test_other_currencies() {
        let rates = ExchangeRates::from_iter([
            (Currency::EUR, dec!(1400)),
            (Currency::JPY, dec!(9.5)),
        ]);
        assert_eq!(convert_to_krw(dec!(100), Currency::EUR, &rates), dec!(140000));
        assert_eq!(convert_to_krw(dec!(50.25), Currency::EUR, &rates), dec!(70350));
        assert_eq!(convert_to_krw(dec!(1000), Currency::JPY, &rates), dec!(9500));
        assert_eq!(convert_to_krw(dec!(10000), Currency::JPY, &rates), dec!(95000));
    }

    #[test]
    fn test_missing_or_zero_rate_yields_zero() {
        assert_eq!(convert_to_krw(dec!(1000), Currency::USD, &usd(dec!(0))), dec!(0));
        assert_eq!(
            convert_to_krw(dec!(1000), Currency::USD, &ExchangeRates::default()),
            dec!(0)
        );
        // Table present but for the wrong currency
        assert_eq!(convert_to_krw(dec!(1000), Currency::EUR, &usd(dec!(1300))), dec!(0));
    }

    #[test]
    fn test_zero_amount() {
        assert_eq!(convert_to_krw(dec!(0), Currency::USD, &usd(dec!(1300))), dec!(0));
        assert_eq!(convert_to_krw(dec!(0), Currency::KRW, &usd(dec!(1))), dec!(0));
    }

    #[test]
    fn test_large_amounts() {
        assert_eq!(
            convert_to_krw(dec!(1_000_000), Currency::USD, &usd(dec!(1300))),
            dec!(1_300_000_000)
        );
    }
}
