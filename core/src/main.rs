//! Walks one resource through its whole lifecycle against a running server.
//!
//! Reads the server location from `RESOURCE_SERVICE_URL`
//! (default `http://127.0.0.1:3000`).

use std::collections::BTreeMap;

use resource_core::{logging, HttpResponse, Resource, ResourceClient};
use rust_decimal::Decimal;
use tracing::{info, warn};

const DEFAULT_URL: &str = "http://127.0.0.1:3000";

fn main() -> anyhow::Result<()> {
    logging::init();

    let base_url = std::env::var("RESOURCE_SERVICE_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
    let client = ResourceClient::new(&base_url);
    info!(base_url = client.base_url(), "running resource lifecycle");

    let mut fan = Resource {
        id: 1,
        name: "ElectricFan".to_string(),
        quantity: 14,
        price: Decimal::new(2090, 2),
    };

    report("create", &client.create(&fan)?);
    report("get", &client.get(fan.id)?);

    fan.quantity = 15;
    fan.price = Decimal::new(2980, 2);
    report("update", &client.update(fan.id, &fan)?);
    report("list", &client.list(&BTreeMap::new())?);

    report("delete", &client.delete(fan.id)?);
    report("list", &client.list(&BTreeMap::new())?);
    report("get", &client.get(fan.id)?);
    Ok(())
}

fn report(action: &str, response: &HttpResponse) {
    if response.is_success() {
        info!(action, status = response.status, body = %response.body, "response");
    } else {
        warn!(action, status = response.status, body = %response.body, "non-success response");
    }
}
