//! # Shipping Estimation
//!
//! The shipping cost engine invoked during checkout. Given a destination
//! CEP and a cart snapshot it classifies items, aggregates a proxy
//! weight, prices by weight tier, applies a same-state discount or
//! cross-state surcharge, clamps, and returns a quote.
//!
//! The estimator never fails: a lookup that errors or times out degrades
//! that side to region-unknown, and any unexpected error in the pricing
//! computation is replaced by a deterministic fallback formula.
//!
//! All money arithmetic is in integer centavos with round-half-up
//! division, so identical inputs always produce bit-identical quotes.

use crate::cart::CartSnapshot;
use crate::cep::Cep;
use crate::error::{StoreError, StoreResult};
use crate::lookup::{BoxedRegionLookup, RegionInfo};
use crate::money::{Currency, Price};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Proxy weight per physical unit; products carry no weight attribute
pub const UNIT_WEIGHT_GRAMS: i64 = 500;

/// Combined subtotal (digital + physical) at which shipping is free.
/// Digital items count toward the threshold on purpose, to incentivize
/// bundling.
pub const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 20_000;

/// Lower bound on a priced quote
pub const MIN_COST_CENTS: i64 = 850;

/// Upper bound on a priced quote
pub const MAX_COST_CENTS: i64 = 15_000;

/// Weight tiers: (inclusive upper bound in grams, base cost in centavos)
pub const PRICING_TIERS: [(i64, i64); 4] = [(300, 850), (500, 1_000), (1_000, 1_250), (2_000, 1_800)];

/// Marginal rate beyond the last tier, centavos per kg
const EXTRA_RATE_CENTS_PER_KG: i64 = 350;

/// Fallback rate, centavos per kg (R$ 10/kg)
const FALLBACK_RATE_CENTS_PER_KG: i64 = 1_000;

/// Fallback floor (R$ 15,00)
const FALLBACK_FLOOR_CENTS: i64 = 1_500;

/// Same-region multiplier, percent
const SAME_REGION_PCT: i64 = 85;

/// Cross-region multiplier, percent
const CROSS_REGION_PCT: i64 = 120;

const DEFAULT_LEAD_TIME_DAYS: u32 = 5;
const SAME_REGION_LEAD_TIME_DAYS: u32 = 3;
const CROSS_REGION_LEAD_TIME_DAYS: u32 = 7;
const FALLBACK_LEAD_TIME_DAYS: u32 = 7;

/// Shipping service label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShippingService {
    /// Nothing to ship, delivered by e-mail
    Digital,
    /// Free standard shipping above the threshold
    Standard,
    /// Default ground service
    #[serde(rename = "PAC")]
    Pac,
}

impl ShippingService {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingService::Digital => "Digital",
            ShippingService::Standard => "Standard",
            ShippingService::Pac => "PAC",
        }
    }
}

impl std::fmt::Display for ShippingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The estimator's output for one (destination, cart) pair.
/// Immutable; the caller decides how long to keep it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuote {
    /// Final cost, already rounded and clamped
    pub cost: Price,

    /// Estimated delivery lead time
    pub lead_time_days: u32,

    /// Service label
    pub service: ShippingService,
}

impl ShippingQuote {
    /// Zero-cost quote for carts with nothing to ship
    pub fn digital() -> Self {
        Self {
            cost: Price::zero(Currency::BRL),
            lead_time_days: 0,
            service: ShippingService::Digital,
        }
    }

    /// Free shipping above the subtotal threshold
    pub fn free_standard() -> Self {
        Self {
            cost: Price::zero(Currency::BRL),
            lead_time_days: DEFAULT_LEAD_TIME_DAYS,
            service: ShippingService::Standard,
        }
    }

    fn pac(cents: i64, lead_time_days: u32) -> Self {
        Self {
            cost: Price::from_cents(cents, Currency::BRL),
            lead_time_days,
            service: ShippingService::Pac,
        }
    }
}

/// Shipping cost estimator.
///
/// Holds the injected region lookup and the fixed store origin CEP.
/// Stateless otherwise; safe to share across concurrent estimations.
pub struct ShippingEstimator {
    region_lookup: BoxedRegionLookup,
    origin: Cep,
}

impl ShippingEstimator {
    pub fn new(region_lookup: BoxedRegionLookup, origin: Cep) -> Self {
        Self {
            region_lookup,
            origin,
        }
    }

    /// The configured store origin CEP
    pub fn origin(&self) -> &Cep {
        &self.origin
    }

    /// Estimate shipping for a cart going to `destination`.
    ///
    /// Never fails. Performs at most two region lookups (origin and
    /// destination, issued concurrently); a lookup failure degrades to
    /// unadjusted base pricing, and an unexpected pricing error is
    /// replaced by the deterministic fallback quote.
    pub async fn estimate(&self, destination: &Cep, cart: &CartSnapshot) -> ShippingQuote {
        // All-digital carts (and empty carts) ship nothing. No lookups.
        if cart.is_all_digital() {
            return ShippingQuote::digital();
        }

        // Free shipping on the combined subtotal, digital included.
        if cart.subtotal.amount >= FREE_SHIPPING_THRESHOLD_CENTS {
            return ShippingQuote::free_standard();
        }

        match self.priced_quote(destination, cart).await {
            Ok(quote) => quote,
            Err(err) => {
                warn!(destination = %destination, error = %err, "shipping estimate degraded to fallback");
                fallback_quote(cart)
            }
        }
    }

    /// Primary pricing path. Lookup failures are handled in-line as
    /// region-unknown; an `Err` here means the computation itself went
    /// wrong and the caller falls back.
    async fn priced_quote(
        &self,
        destination: &Cep,
        cart: &CartSnapshot,
    ) -> StoreResult<ShippingQuote> {
        let grams = physical_weight_grams(cart)?;
        if grams == 0 {
            // Physical lines present but no effective weight.
            return Ok(ShippingQuote::digital());
        }

        // Origin and destination are independent; resolve them together.
        let (origin_region, destination_region) = futures::join!(
            self.resolve_region(&self.origin),
            self.resolve_region(destination),
        );

        let base = base_cost_cents(grams)?;

        let (cents, lead_time_days) = match (origin_region, destination_region) {
            (Some(origin), Some(destination)) if origin.region_code == destination.region_code => {
                (
                    mul_percent(base, SAME_REGION_PCT)?,
                    SAME_REGION_LEAD_TIME_DAYS,
                )
            }
            (Some(_), Some(_)) => (
                mul_percent(base, CROSS_REGION_PCT)?,
                CROSS_REGION_LEAD_TIME_DAYS,
            ),
            _ => (base, DEFAULT_LEAD_TIME_DAYS),
        };

        let cents = cents.clamp(MIN_COST_CENTS, MAX_COST_CENTS);

        Ok(ShippingQuote::pac(cents, lead_time_days))
    }

    /// Best-effort region resolution: failure and not-found both map to
    /// `None` so pricing continues without the regional adjustment.
    async fn resolve_region(&self, cep: &Cep) -> Option<RegionInfo> {
        match self.region_lookup.lookup_region(cep).await {
            Ok(region) => region,
            Err(err) => {
                debug!(cep = %cep, error = %err, "region lookup failed, treating as unknown");
                None
            }
        }
    }
}

/// Aggregate proxy weight of the shippable lines
fn physical_weight_grams(cart: &CartSnapshot) -> StoreResult<i64> {
    cart.physical_lines().try_fold(0_i64, |acc, line| {
        i64::from(line.quantity)
            .checked_mul(UNIT_WEIGHT_GRAMS)
            .and_then(|grams| acc.checked_add(grams))
            .ok_or_else(|| StoreError::Internal("cart weight overflow".to_string()))
    })
}

/// Base cost by weight tier, inclusive upper bounds
fn base_cost_cents(grams: i64) -> StoreResult<i64> {
    for (bound, cents) in PRICING_TIERS {
        if grams <= bound {
            return Ok(cents);
        }
    }

    let (last_bound, last_cents) = PRICING_TIERS[PRICING_TIERS.len() - 1];
    let extra = grams - last_bound;
    let surcharge = div_round_half_up(
        extra
            .checked_mul(EXTRA_RATE_CENTS_PER_KG)
            .ok_or_else(|| StoreError::Internal("tier surcharge overflow".to_string()))?,
        1_000,
    );
    last_cents
        .checked_add(surcharge)
        .ok_or_else(|| StoreError::Internal("tier surcharge overflow".to_string()))
}

/// Apply a percentage multiplier with round-half-up at the centavo
fn mul_percent(cents: i64, percent: i64) -> StoreResult<i64> {
    let scaled = cents
        .checked_mul(percent)
        .ok_or_else(|| StoreError::Internal("adjustment overflow".to_string()))?;
    Ok(div_round_half_up(scaled, 100))
}

/// Round-half-up integer division for non-negative operands
fn div_round_half_up(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator / 2) / denominator
}

/// Deterministic degraded pricing: R$ 10/kg with a R$ 15,00 floor,
/// computed with saturating arithmetic so it can never itself fail.
fn fallback_quote(cart: &CartSnapshot) -> ShippingQuote {
    let grams = cart.physical_lines().fold(0_i64, |acc, line| {
        acc.saturating_add(i64::from(line.quantity).saturating_mul(UNIT_WEIGHT_GRAMS))
    });

    if grams == 0 {
        return ShippingQuote::digital();
    }

    let cents = div_round_half_up(grams.saturating_mul(FALLBACK_RATE_CENTS_PER_KG), 1_000)
        .max(FALLBACK_FLOOR_CENTS);

    ShippingQuote::pac(cents, FALLBACK_LEAD_TIME_DAYS)
}

/// Generation counter for superseding in-flight estimations.
///
/// Each new estimation begins a generation; when a result arrives the
/// caller checks `is_current` and discards it if a newer estimation has
/// started since. Last-request-wins by initiation order, not by
/// completion order.
#[derive(Debug, Default)]
pub struct QuoteSequencer {
    current: AtomicU64,
}

impl QuoteSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding any in-flight estimation
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True if `token` still belongs to the freshest estimation
    pub fn is_current(&self, token: u64) -> bool {
        self.current.load(Ordering::SeqCst) == token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::CartLine;
    use crate::error::StoreError;
    use crate::product::ProductKind;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    const ORIGIN: &str = "01310100"; // São Paulo
    const DESTINATION: &str = "20040020"; // Rio de Janeiro

    #[derive(Clone, Copy)]
    enum Script {
        Region(&'static str),
        NotFound,
        Fail,
    }

    struct StubRegionLookup {
        answers: HashMap<String, Script>,
        calls: AtomicUsize,
    }

    impl StubRegionLookup {
        fn new(answers: &[(&str, Script)]) -> Arc<Self> {
            Arc::new(Self {
                answers: answers
                    .iter()
                    .map(|(cep, script)| (cep.to_string(), *script))
                    .collect(),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl crate::lookup::RegionLookup for StubRegionLookup {
        async fn lookup_region(&self, cep: &Cep) -> StoreResult<Option<RegionInfo>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.answers.get(cep.as_digits()) {
                Some(Script::Region(uf)) => Ok(Some(RegionInfo::new(*uf))),
                Some(Script::NotFound) | None => Ok(None),
                Some(Script::Fail) => Err(StoreError::Network("connection refused".into())),
            }
        }
    }

    fn estimator(lookup: Arc<StubRegionLookup>) -> ShippingEstimator {
        ShippingEstimator::new(lookup, Cep::parse(ORIGIN).unwrap())
    }

    fn destination() -> Cep {
        Cep::parse(DESTINATION).unwrap()
    }

    fn line(cents: i64, quantity: u32, kind: ProductKind) -> CartLine {
        CartLine {
            product_id: "p".into(),
            title: "p".into(),
            unit_price: Price::from_cents(cents, Currency::BRL),
            quantity,
            kind,
        }
    }

    fn physical_cart(cents: i64, quantity: u32) -> CartSnapshot {
        CartSnapshot::new(vec![line(cents, quantity, ProductKind::Physical)])
    }

    #[tokio::test]
    async fn all_digital_cart_ships_free_without_lookups() {
        let lookup = StubRegionLookup::new(&[(ORIGIN, Script::Region("SP"))]);
        let estimator = estimator(lookup.clone());
        let cart = CartSnapshot::new(vec![line(3_990, 3, ProductKind::Digital)]);

        let quote = estimator.estimate(&destination(), &cart).await;

        assert_eq!(quote, ShippingQuote::digital());
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn empty_cart_quotes_as_digital() {
        let lookup = StubRegionLookup::new(&[]);
        let estimator = estimator(lookup.clone());

        let quote = estimator.estimate(&destination(), &CartSnapshot::empty()).await;

        assert_eq!(quote, ShippingQuote::digital());
        assert_eq!(lookup.calls(), 0);
    }

    #[tokio::test]
    async fn combined_subtotal_reaches_free_shipping() {
        let lookup = StubRegionLookup::new(&[
            (ORIGIN, Script::Region("SP")),
            (DESTINATION, Script::Region("RJ")),
        ]);
        let estimator = estimator(lookup.clone());
        // Digital items count toward the threshold.
        let cart = CartSnapshot::new(vec![
            line(15_000, 1, ProductKind::Physical),
            line(5_000, 1, ProductKind::Digital),
        ]);
        assert_eq!(cart.subtotal.amount, FREE_SHIPPING_THRESHOLD_CENTS);

        let quote = estimator.estimate(&destination(), &cart).await;

        assert_eq!(quote.cost.amount, 0);
        assert_eq!(quote.lead_time_days, 5);
        assert_eq!(quote.service, ShippingService::Standard);
        assert_eq!(lookup.calls(), 0);
    }

    #[test]
    fn tier_boundaries_are_inclusive() {
        assert_eq!(base_cost_cents(300).unwrap(), 850);
        assert_eq!(base_cost_cents(301).unwrap(), 1_000);
        assert_eq!(base_cost_cents(500).unwrap(), 1_000);
        assert_eq!(base_cost_cents(1_000).unwrap(), 1_250);
        assert_eq!(base_cost_cents(2_000).unwrap(), 1_800);
        // 18.00 + 0.5 kg x 3.50
        assert_eq!(base_cost_cents(2_500).unwrap(), 1_975);
    }

    #[tokio::test]
    async fn unresolved_regions_price_at_base() {
        let lookup = StubRegionLookup::new(&[]);
        let estimator = estimator(lookup.clone());

        // One unit = 500 g
        let quote = estimator
            .estimate(&destination(), &physical_cart(2_990, 1))
            .await;
        assert_eq!(quote.cost.amount, 1_000);
        assert_eq!(quote.lead_time_days, 5);
        assert_eq!(quote.service, ShippingService::Pac);
        assert_eq!(lookup.calls(), 2);

        // Two units = 1.0 kg
        let quote = estimator
            .estimate(&destination(), &physical_cart(2_990, 2))
            .await;
        assert_eq!(quote.cost.amount, 1_250);

        // Five units = 2.5 kg
        let quote = estimator
            .estimate(&destination(), &physical_cart(2_990, 5))
            .await;
        assert_eq!(quote.cost.amount, 1_975);
    }

    #[tokio::test]
    async fn same_region_gets_discount_and_faster_lead_time() {
        let lookup = StubRegionLookup::new(&[
            (ORIGIN, Script::Region("SP")),
            (DESTINATION, Script::Region("SP")),
        ]);
        let estimator = estimator(lookup);

        let quote = estimator
            .estimate(&destination(), &physical_cart(2_990, 1))
            .await;

        // 10.00 x 0.85 = 8.50, exactly the floor
        assert_eq!(quote.cost.amount, 850);
        assert_eq!(quote.lead_time_days, 3);
        assert_eq!(quote.service, ShippingService::Pac);
    }

    #[tokio::test]
    async fn cross_region_gets_surcharge_and_slower_lead_time() {
        let lookup = StubRegionLookup::new(&[
            (ORIGIN, Script::Region("SP")),
            (DESTINATION, Script::Region("RJ")),
        ]);
        let estimator = estimator(lookup);

        let quote = estimator
            .estimate(&destination(), &physical_cart(2_990, 1))
            .await;

        assert_eq!(quote.cost.amount, 1_200);
        assert_eq!(quote.lead_time_days, 7);
    }

    #[tokio::test]
    async fn cost_is_clamped_to_maximum() {
        let lookup = StubRegionLookup::new(&[]);
        let estimator = estimator(lookup);

        // 100 units = 50 kg: 18.00 + 48 x 3.50 = 186.00, clamped to 150.00.
        // Cheap items keep the subtotal under the free threshold.
        let quote = estimator
            .estimate(&destination(), &physical_cart(100, 100))
            .await;

        assert_eq!(quote.cost.amount, MAX_COST_CENTS);
        assert_eq!(quote.lead_time_days, 5);
    }

    #[test]
    fn adjustment_rounds_half_up_and_clamps_to_minimum() {
        // 8.50 x 0.85 = 7.225 -> 7.23 after round-half-up at the centavo
        assert_eq!(mul_percent(850, SAME_REGION_PCT).unwrap(), 723);
        assert_eq!(723_i64.clamp(MIN_COST_CENTS, MAX_COST_CENTS), 850);

        // Exact half rounds up
        assert_eq!(div_round_half_up(72_250, 100), 723);
        assert_eq!(div_round_half_up(150, 100), 2);
    }

    #[tokio::test]
    async fn lookup_failure_degrades_to_base_pricing() {
        let lookup = StubRegionLookup::new(&[
            (ORIGIN, Script::Fail),
            (DESTINATION, Script::Fail),
        ]);
        let estimator = estimator(lookup);

        let quote = estimator
            .estimate(&destination(), &physical_cart(2_990, 1))
            .await;

        assert_eq!(quote.cost.amount, 1_000);
        assert_eq!(quote.lead_time_days, 5);
        assert_eq!(quote.service, ShippingService::Pac);
    }

    #[tokio::test]
    async fn single_sided_failure_also_skips_adjustment() {
        let lookup = StubRegionLookup::new(&[
            (ORIGIN, Script::Fail),
            (DESTINATION, Script::Region("SP")),
        ]);
        let estimator = estimator(lookup);

        let quote = estimator
            .estimate(&destination(), &physical_cart(2_990, 1))
            .await;

        assert_eq!(quote.cost.amount, 1_000);
        assert_eq!(quote.lead_time_days, 5);
    }

    #[tokio::test]
    async fn identical_inputs_yield_identical_quotes() {
        let lookup = StubRegionLookup::new(&[
            (ORIGIN, Script::Region("SP")),
            (DESTINATION, Script::Region("RJ")),
        ]);
        let estimator = estimator(lookup);
        let cart = physical_cart(2_990, 3);

        let first = estimator.estimate(&destination(), &cart).await;
        let second = estimator.estimate(&destination(), &cart).await;

        assert_eq!(first, second);
    }

    #[test]
    fn fallback_prices_by_weight_with_floor() {
        // 5 units = 2.5 kg -> R$ 25,00
        let quote = fallback_quote(&physical_cart(2_990, 5));
        assert_eq!(quote.cost.amount, 2_500);
        assert_eq!(quote.lead_time_days, 7);
        assert_eq!(quote.service, ShippingService::Pac);

        // 1 unit = 0.5 kg -> R$ 5,00, floored at R$ 15,00
        let quote = fallback_quote(&physical_cart(2_990, 1));
        assert_eq!(quote.cost.amount, 1_500);

        // Nothing shippable -> digital quote
        let digital = CartSnapshot::new(vec![line(990, 2, ProductKind::Digital)]);
        assert_eq!(fallback_quote(&digital), ShippingQuote::digital());
    }

    #[test]
    fn sequencer_discards_superseded_generations() {
        let sequencer = QuoteSequencer::new();

        let first = sequencer.begin();
        let second = sequencer.begin();

        // The first request was superseded before completing.
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[test]
    fn service_labels_serialize_as_wire_strings() {
        assert_eq!(
            serde_json::to_string(&ShippingService::Pac).unwrap(),
            "\"PAC\""
        );
        assert_eq!(
            serde_json::to_string(&ShippingService::Digital).unwrap(),
            "\"Digital\""
        );
        assert_eq!(ShippingService::Standard.as_str(), "Standard");
    }
}
