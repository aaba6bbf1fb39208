//! Toast notifications and the success pages that follow a mutation.

use serde::{Deserialize, Serialize};

/// How long a toast stays on screen.
pub const NOTIFICATION_TIMER_MS: u32 = 4000;

/// Payload rendered into the SweetAlert2 toast of a swapped fragment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub message: String,
    /// SweetAlert2 icon name.
    pub icon: &'static str,
    pub timer_ms: u32,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            icon: "success",
            timer_ms: NOTIFICATION_TIMER_MS,
        }
    }
}

/// Mutation that just completed, as named in `/{entity}/sucesso/{outcome}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Cadastro,
    Alteracao,
    Remocao,
}

impl Outcome {
    pub fn as_path(self) -> &'static str {
        match self {
            Outcome::Cadastro => "cadastro",
            Outcome::Alteracao => "alteracao",
            Outcome::Remocao => "remocao",
        }
    }

    /// Headline of the full-page confirmation.
    pub fn page_message(self, label: &str) -> String {
        match self {
            Outcome::Cadastro => format!("Cadastro de {label} Efetuado com Sucesso"),
            Outcome::Alteracao => format!("Alteração de {label} Efetuada com Sucesso"),
            Outcome::Remocao => format!("Remoção de {label} Efetuada com Sucesso"),
        }
    }

    pub fn notification(self, label: &str) -> Notification {
        let verb = match self {
            Outcome::Cadastro => "cadastrada",
            Outcome::Alteracao => "alterada",
            Outcome::Remocao => "removida",
        };
        Notification::success(format!("{label} {verb} com sucesso!"))
    }

    /// After registering the operator gets a fresh form; otherwise back to search.
    pub fn returns_to_register(self) -> bool {
        self == Outcome::Cadastro
    }
}
