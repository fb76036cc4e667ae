//! Breakdown Formatter
//!
//! Turns a composed [`PriceBreakdown`] into the ordered display lines the UI
//! renders. This is the only place monetary values are rounded - always to
//! whole rubles, always after summation.

use shared::models::breakdown::{
    BreakdownLine, PRICE_UNAVAILABLE, PriceSummary, format_cny, format_eur, format_rub,
};

use super::composer::PriceBreakdown;

pub const LABEL_VEHICLE_PRICE: &str = "Цена автомобиля";
pub const LABEL_PRICE_IN_CHINA: &str = "Цена в Китае";
pub const LABEL_CUSTOMS_GROUP: &str = "Таможенные платежи";
pub const LABEL_IMPORT_DUTY: &str = "Таможенная пошлина";
pub const LABEL_DUTY_IN_EUR: &str = "Пошлина в евро";
pub const LABEL_CLEARANCE_FEE: &str = "Таможенное оформление";
pub const LABEL_RECYCLING_FEE: &str = "Утилизационный сбор";
pub const LABEL_LOGISTICS: &str = "Логистика по Китаю";
pub const LABEL_PAPERWORK: &str = "Оформление документов";
pub const LABEL_COMMISSION: &str = "Комиссия компании";
pub const LABEL_DELIVERY: &str = "Доставка по России";
pub const LABEL_TOTAL: &str = "ИТОГО";

/// Ordered display lines for one quote
///
/// Ordering is part of the contract: vehicle price, customs group (duty +
/// clearance + recycling as sub-lines), logistics, paperwork, commission,
/// delivery, total. An unpriceable listing yields a single sentinel line
/// rather than an error - absent prices are an expected state.
pub fn format_breakdown(quote: Option<&PriceBreakdown>) -> Vec<BreakdownLine> {
    let Some(quote) = quote else {
        return vec![BreakdownLine::new(PRICE_UNAVAILABLE, "—")];
    };

    let mut customs_sub_lines = Vec::with_capacity(3);
    if let Some(duty) = &quote.duty {
        customs_sub_lines.push(
            BreakdownLine::new(LABEL_IMPORT_DUTY, format_rub(duty.duty_rub)).with_sub_lines(vec![
                BreakdownLine::new(LABEL_DUTY_IN_EUR, format_eur(duty.duty_eur)),
            ]),
        );
    }
    customs_sub_lines.push(BreakdownLine::new(
        LABEL_CLEARANCE_FEE,
        format_rub(quote.customs_fee_rub),
    ));
    customs_sub_lines.push(BreakdownLine::new(
        LABEL_RECYCLING_FEE,
        format_rub(quote.recycling_fee_rub),
    ));

    let duty_rub = quote.duty.as_ref().map(|d| d.duty_rub).unwrap_or_default();
    let customs_total = duty_rub + quote.customs_fee_rub + quote.recycling_fee_rub;

    vec![
        BreakdownLine::new(LABEL_VEHICLE_PRICE, format_rub(quote.price_rub)).with_sub_lines(vec![
            BreakdownLine::new(LABEL_PRICE_IN_CHINA, format_cny(quote.price_cny)),
        ]),
        BreakdownLine::new(LABEL_CUSTOMS_GROUP, format_rub(customs_total))
            .with_sub_lines(customs_sub_lines),
        BreakdownLine::new(LABEL_LOGISTICS, format_rub(quote.logistics_fee_rub)),
        BreakdownLine::new(LABEL_PAPERWORK, format_rub(quote.brokerage_fee_rub)),
        BreakdownLine::new(LABEL_COMMISSION, format_rub(quote.commission_rub)),
        BreakdownLine::new(LABEL_DELIVERY, format_rub(quote.delivery_fee_rub)),
        BreakdownLine::total(LABEL_TOTAL, format_rub(quote.total_rub)),
    ]
}

/// Compact card summary for one quote
pub fn summarize(quote: Option<&PriceBreakdown>) -> PriceSummary {
    match quote {
        Some(quote) => PriceSummary::from_total(quote.total_rub),
        None => PriceSummary::unavailable(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::composer::DutyLine;
    use rust_decimal::Decimal;

    fn quote() -> PriceBreakdown {
        PriceBreakdown {
            price_cny: Decimal::from(150_000),
            price_rub: Decimal::from(1_657_500),
            duty: Some(DutyLine {
                duty_eur: Decimal::from(5_400),
                duty_rub: Decimal::from(513_000),
                was_overridden: false,
            }),
            customs_fee_rub: Decimal::from(13_541),
            recycling_fee_rub: Decimal::from(5_200),
            logistics_fee_rub: Decimal::from(165_750),
            brokerage_fee_rub: Decimal::from(75_000),
            commission_rub: Decimal::from(100_000),
            delivery_fee_rub: Decimal::from(200_000),
            total_rub: Decimal::from(2_729_991),
            cny_rate: Decimal::new(1105, 2),
            eur_rate: Some(Decimal::from(95)),
        }
    }

    #[test]
    fn test_line_ordering() {
        let lines = format_breakdown(Some(&quote()));
        let labels: Vec<&str> = lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                LABEL_VEHICLE_PRICE,
                LABEL_CUSTOMS_GROUP,
                LABEL_LOGISTICS,
                LABEL_PAPERWORK,
                LABEL_COMMISSION,
                LABEL_DELIVERY,
                LABEL_TOTAL,
            ]
        );
        assert!(lines.last().unwrap().is_total);
        assert!(lines[..lines.len() - 1].iter().all(|l| !l.is_total));
    }

    #[test]
    fn test_customs_group_aggregates_sub_lines() {
        let lines = format_breakdown(Some(&quote()));
        let customs = &lines[1];
        // 513 000 + 13 541 + 5 200
        assert_eq!(customs.value, format_rub(Decimal::from(531_741)));
        let sub_labels: Vec<&str> = customs.sub_lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            sub_labels,
            vec![LABEL_IMPORT_DUTY, LABEL_CLEARANCE_FEE, LABEL_RECYCLING_FEE]
        );
        // the duty sub-line carries its EUR source value
        assert_eq!(
            customs.sub_lines[0].sub_lines[0].value,
            format_eur(Decimal::from(5_400))
        );
    }

    #[test]
    fn test_electric_quote_has_no_duty_sub_line() {
        let mut q = quote();
        q.duty = None;
        let lines = format_breakdown(Some(&q));
        let customs = &lines[1];
        assert!(customs.sub_lines.iter().all(|l| l.label != LABEL_IMPORT_DUTY));
        assert_eq!(customs.value, format_rub(Decimal::from(18_741)));
    }

    #[test]
    fn test_vehicle_price_shows_origin_currency() {
        let lines = format_breakdown(Some(&quote()));
        assert_eq!(lines[0].sub_lines[0].value, format_cny(Decimal::from(150_000)));
    }

    #[test]
    fn test_rounding_only_at_display() {
        // fractional line values must round independently of the total,
        // which is rounded from the full-precision sum
        let mut q = quote();
        q.price_rub = Decimal::new(1_657_500_4, 1); // 1 657 500.4
        q.total_rub = Decimal::new(2_729_991_4, 1);
        let lines = format_breakdown(Some(&q));
        assert_eq!(lines[0].value, format_rub(Decimal::from(1_657_500)));
        assert_eq!(lines.last().unwrap().value, format_rub(Decimal::from(2_729_991)));
    }

    #[test]
    fn test_unpriceable_listing_yields_sentinel() {
        let lines = format_breakdown(None);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].label, PRICE_UNAVAILABLE);
        assert!(!lines[0].is_total);

        let summary = summarize(None);
        assert_eq!(summary.total_rub, None);
    }

    #[test]
    fn test_summary_short_form() {
        let summary = summarize(Some(&quote()));
        assert_eq!(summary.total_rub, Some(2_729_991));
        assert_eq!(summary.total_formatted, "2.73 млн ₽");
    }
}
