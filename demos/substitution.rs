//! Surrogate Substitution Example
//!
//! Builds a surrogate for a payment gateway, scripts its answers, checks
//! what the code under test sent it, then verifies that the surrogate still
//! matches the gateway's API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example substitution
//!
//! # Show engine resolution logs
//! RUST_LOG=surrogate_core=trace cargo run --example substitution
//! ```

use anyhow::{Result, bail};
use surrogate::prelude::*;

/// The API the surrogate has to honor.
fn gateway_shape() -> ClassShape {
    ClassShape::new("PaymentGateway")
        .class_method("connect", [Param::required("api_key")])
        .instance_method("charge", [Param::required("cents"), Param::keyword("currency")])
        .instance_method("refund", [Param::required("charge_id")])
        .instance_method("balance", [])
}

/// Code under test: retries a declined charge once.
fn checkout(gateway: &Instance, cents: i64) -> Result<bool> {
    for _ in 0..2 {
        let status = gateway.call("charge", &[Value::Int(cents), Value::symbol("usd")])?;
        if status == Value::symbol("approved") {
            return Ok(true);
        }
    }
    Ok(false)
}

fn main() -> Result<()> {
    surrogate::init_logging("info");

    let mock = Endower::endow("MockPaymentGateway");
    mock.sing_class(
        "connect",
        Song::new().block(Block::new([Param::required("api_key")], |receiver, args| {
            receiver.set_attribute("api_key", args.first().cloned().unwrap_or(Value::Nil));
            Ok(Value::Bool(true))
        })),
    )
    .sing(
        "charge",
        Song::new()
            .default(Value::symbol("approved"))
            .params([Param::required("cents"), Param::keyword("currency")]),
    )
    .sing("refund", Song::new().params([Param::required("charge_id")]))
    .sing("balance", Song::new().stored_default(0).params([]));

    mock.call("connect", &[Value::from("sk_test")])?;
    tracing::info!(api_key = %mock.attribute("api_key").unwrap_or(surrogate::core::Value::Nil), "connected");

    let gateway = mock.new_instance(&[])?;
    gateway.will_queue("charge", [Value::symbol("declined")])?;
    if !checkout(&gateway, 1_500)? {
        bail!("checkout should succeed on retry");
    }
    tracing::info!(calls = gateway.invocations("charge")?.len(), "charge attempts");

    let report = ApiComparer::new(&mock, &gateway_shape())
        .report(&ComparisonOptions::default().names(true));
    println!("{}", report.to_json()?);
    if !report.is_substitutable() {
        bail!("MockPaymentGateway drifted from PaymentGateway");
    }

    println!("MockPaymentGateway is a faithful stand-in for PaymentGateway");
    Ok(())
}
