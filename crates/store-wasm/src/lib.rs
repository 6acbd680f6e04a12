//! # store-wasm
//!
//! WebAssembly bindings for compia-store-rs.
//!
//! The storefront keeps the cart client-side; this crate gives it the
//! same cart math and CEP validation the backend uses:
//! - Line and cart totals in centavos
//! - Brazilian price formatting ("R$ 19,90")
//! - CEP validation before the quote request is sent
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { calculate_cart_total, validate_cep, format_price } from 'compia-store-wasm';
//!
//! await init();
//!
//! if (validate_cep(cepInput.value)) {
//!   const total = calculate_cart_total(cart);
//!   totalLabel.textContent = format_price(total);
//! }
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use serde::{Deserialize, Serialize};
use store_core::{Cep, Currency, Price};
use wasm_bindgen::prelude::*;

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Cart item for the WASM interface
#[derive(Debug, Serialize, Deserialize)]
#[wasm_bindgen]
pub struct WasmCartItem {
    product_id: String,
    title: String,
    price_cents: i64,
    quantity: u32,
    digital: bool,
}

#[wasm_bindgen]
impl WasmCartItem {
    #[wasm_bindgen(constructor)]
    pub fn new(
        product_id: String,
        title: String,
        price_cents: i64,
        quantity: u32,
        digital: bool,
    ) -> Self {
        Self {
            product_id,
            title,
            price_cents,
            quantity,
            digital,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn product_id(&self) -> String {
        self.product_id.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn title(&self) -> String {
        self.title.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    #[wasm_bindgen(getter)]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    #[wasm_bindgen(getter)]
    pub fn digital(&self) -> bool {
        self.digital
    }

    /// Line total in centavos
    #[wasm_bindgen]
    pub fn total_cents(&self) -> i64 {
        self.price_cents.saturating_mul(i64::from(self.quantity))
    }

    /// Format the unit price for display
    #[wasm_bindgen]
    pub fn format_price(&self) -> String {
        format_price(self.price_cents)
    }

    /// Format the line total for display
    #[wasm_bindgen]
    pub fn format_total(&self) -> String {
        format_price(self.total_cents())
    }
}

/// Calculate the total for a list of cart items, in centavos
#[wasm_bindgen]
pub fn calculate_cart_total(items: JsValue) -> Result<i64, JsValue> {
    let items: Vec<WasmCartItem> = serde_wasm_bindgen::from_value(items)
        .map_err(|e| JsValue::from_str(&format!("Invalid cart items: {}", e)))?;

    let total: i64 = items.iter().map(|item| item.total_cents()).sum();
    Ok(total)
}

/// Format a price in centavos for display ("R$ 19,90")
#[wasm_bindgen]
pub fn format_price(cents: i64) -> String {
    Price::from_cents(cents, Currency::BRL).display()
}

/// Validate a CEP before sending a quote or address request.
/// Accepts "01310-100" and "01310100" alike.
#[wasm_bindgen]
pub fn validate_cep(cep: &str) -> bool {
    Cep::parse(cep).is_ok()
}

/// Normalize a CEP to its 8-digit form, or `None` if invalid
#[wasm_bindgen]
pub fn normalize_cep(cep: &str) -> Option<String> {
    Cep::parse(cep).ok().map(|c| c.as_digits().to_string())
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
