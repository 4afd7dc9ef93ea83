use context_bank_core::client::{ClientResult, HttpTransport, OnyxClient};
use context_bank_core::control::OnyxControlPlane;
use tracing::info_span;

use crate::config::ContextBankConfig;

pub fn build_control_plane(
    config: &ContextBankConfig,
) -> ClientResult<OnyxControlPlane<HttpTransport>> {
    let transport = HttpTransport::new(config.onyx_api_key.clone())?;
    let span = info_span!(
        "onyx",
        base_url = %config.onyx_api_base,
        authenticated = transport.has_api_key()
    );
    let client = OnyxClient::new(config.onyx_api_base.clone(), transport).with_span(span);
    Ok(OnyxControlPlane::new(client))
}
