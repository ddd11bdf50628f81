//! Request dispatcher for the external-message channel.

use std::{cell::Cell, rc::Rc};

use desk_api_contract::{
    Desk, DeskApiError, DeskApiRequest, DeskApiResponse, LaunchOptions, MessageSender,
    ResponseOperands, SetWindowPropertiesOperands,
};
use desk_host::{DeskApiCapabilities, DeskHostServices, EventPort};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    adapters::{DeskApi, NotificationApi},
    config::BridgeConfig,
    relay::EventRelay,
};

/// Routes desk API requests to the host and gates desk removal on user confirmation.
///
/// Construct one bridge when the host starts and pass it to whatever receives external
/// messages and port connections.
pub struct DeskApiBridge {
    pub(crate) desks: DeskApi,
    pub(crate) notifications: NotificationApi,
    pub(crate) config: BridgeConfig,
    capabilities: DeskApiCapabilities,
    /// Bumped by every confirmation; a flow only clears the shared notification while it
    /// still holds the latest generation.
    pub(crate) confirmation_generation: Cell<u64>,
}

impl DeskApiBridge {
    /// Builds a bridge over `services`.
    pub fn new(services: DeskHostServices, config: BridgeConfig) -> Self {
        let DeskHostServices {
            desks,
            notifications,
            capabilities,
        } = services;
        let missing = capabilities.missing();
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|op| op.method_name()).collect();
            warn!(missing = ?names, "desk host lacks some operations");
        }
        Self {
            desks: DeskApi::new(desks, capabilities),
            notifications: NotificationApi::new(notifications, capabilities),
            config,
            capabilities,
            confirmation_generation: Cell::new(0),
        }
    }

    /// Host capability snapshot the bridge was built with.
    pub fn capabilities(&self) -> DeskApiCapabilities {
        self.capabilities
    }

    /// Active configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Handles one raw message from the external channel.
    ///
    /// Failures of a recognized request become an `OperationFailure` response.
    ///
    /// # Errors
    ///
    /// Returns [`DeskApiError::Protocol`] for envelopes with an unknown or missing
    /// `messageType`; those signal a caller/bridge version mismatch and are never answered.
    pub async fn on_message_external(
        &self,
        message: Value,
        sender: &MessageSender,
    ) -> Result<DeskApiResponse, DeskApiError> {
        let request = DeskApiRequest::from_value(message)?;
        match self.handle(request, sender).await {
            Ok(response) => Ok(response),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                debug!(kind = ?err.kind(), error = %err, "desk api request failed");
                Ok(DeskApiResponse::failure(&err))
            }
        }
    }

    /// Dispatches a typed request to its handler.
    ///
    /// # Errors
    ///
    /// Returns the handler's [`DeskApiError`].
    pub async fn handle(
        &self,
        request: DeskApiRequest,
        sender: &MessageSender,
    ) -> Result<DeskApiResponse, DeskApiError> {
        debug!(
            message_type = request.request_type().as_str(),
            tab_id = ?sender.tab_id,
            origin = sender.origin.as_deref().unwrap_or_default(),
            "dispatching desk api request"
        );
        match request {
            DeskApiRequest::LaunchDesk(options) => self.launch_desk(&options).await,
            DeskApiRequest::RemoveDesk(operands) => self.remove_desk(&operands).await,
            DeskApiRequest::SetWindowProperties(operands) => {
                self.set_window_properties(&operands, sender).await
            }
            DeskApiRequest::GetActiveDesk => self.get_active_desk().await,
            DeskApiRequest::SwitchDesk(operands) => self.switch_desk(&operands.desk_id).await,
            DeskApiRequest::GetDeskById(operands) => {
                self.get_desk_by_id(&operands.desk_id).await
            }
            DeskApiRequest::GetAllDesks => self.get_all_desks().await,
        }
    }

    /// Launches a desk; responds with its UUID.
    ///
    /// # Errors
    ///
    /// Returns unsupported or host errors.
    pub async fn launch_desk(
        &self,
        options: &LaunchOptions,
    ) -> Result<DeskApiResponse, DeskApiError> {
        let desk_uuid = self.desks.launch_desk(options).await?;
        Ok(DeskApiResponse::desk(Desk::new(desk_uuid)))
    }

    /// Applies window properties to the requested window. When the request names none, the
    /// sender's tab is used, then the sender's window.
    ///
    /// # Errors
    ///
    /// Returns a validation error when no window can be resolved, otherwise unsupported or
    /// host errors.
    pub async fn set_window_properties(
        &self,
        operands: &SetWindowPropertiesOperands,
        sender: &MessageSender,
    ) -> Result<DeskApiResponse, DeskApiError> {
        let window_id = operands
            .window_id
            .or(sender.tab_id)
            .or(sender.window_id)
            .ok_or_else(|| DeskApiError::Validation("window can not be found".to_string()))?;
        self.desks
            .set_window_properties(window_id, operands.properties())
            .await?;
        Ok(DeskApiResponse::empty_success())
    }

    /// Responds with the active desk's UUID.
    ///
    /// # Errors
    ///
    /// Returns unsupported or host errors.
    pub async fn get_active_desk(&self) -> Result<DeskApiResponse, DeskApiError> {
        let desk_uuid = self.desks.get_active_desk().await?;
        Ok(DeskApiResponse::desk(Desk::new(desk_uuid)))
    }

    /// Switches to `desk_id`.
    ///
    /// # Errors
    ///
    /// Returns unsupported or host errors.
    pub async fn switch_desk(&self, desk_id: &str) -> Result<DeskApiResponse, DeskApiError> {
        self.desks.switch_desk(desk_id).await?;
        Ok(DeskApiResponse::empty_success())
    }

    /// Responds with the UUID and name of `desk_id`.
    ///
    /// # Errors
    ///
    /// Returns unsupported or host errors.
    pub async fn get_desk_by_id(&self, desk_id: &str) -> Result<DeskApiResponse, DeskApiError> {
        let desk = self.desks.get_desk_by_id(desk_id).await?;
        Ok(DeskApiResponse::desk(desk))
    }

    /// Responds with every desk.
    ///
    /// # Errors
    ///
    /// Returns unsupported or host errors.
    pub async fn get_all_desks(&self) -> Result<DeskApiResponse, DeskApiError> {
        let desks = self.desks.get_all_desks().await?;
        Ok(DeskApiResponse::success(ResponseOperands::Desks(desks)))
    }

    /// Accepts a page connection and returns the relay that feeds it desk events.
    ///
    /// # Errors
    ///
    /// Returns unsupported or host errors when the host cannot deliver desk events.
    pub fn on_connect_external(
        &self,
        port: Rc<dyn EventPort>,
    ) -> Result<EventRelay, DeskApiError> {
        let events = self.desks.subscribe_events()?;
        debug!("page connected for desk events");
        Ok(EventRelay::new(events, port))
    }
}
