use crate::core::domain::value_object::{PveCsrfToken, PveTicket};

/// An authenticated Proxmox session: the ticket presented as a cookie on
/// every request plus the CSRF token required on state-changing ones.
#[derive(Debug, Clone)]
pub struct Session {
    ticket: PveTicket,
    csrf_token: PveCsrfToken,
}

impl Session {
    pub fn new(ticket: PveTicket, csrf_token: PveCsrfToken) -> Self {
        Self { ticket, csrf_token }
    }

    pub fn ticket(&self) -> &PveTicket {
        &self.ticket
    }

    pub fn csrf_token(&self) -> &PveCsrfToken {
        &self.csrf_token
    }
}
