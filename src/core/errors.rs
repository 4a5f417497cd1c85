// src/core/errors.rs

//! Defines the primary error type for the entire application.

use std::sync::Arc;
use thiserror::Error;

/// The broad class an error belongs to. Used for logging and by callers that need to
/// react differently to, say, a lookup miss and a failed firewall script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong argument count or shape, unknown command or sub-action.
    Validation,
    /// A user or rule lookup missed.
    NotFound,
    /// Duplicate email, duplicate rule address, already logged in or out.
    Conflict,
    /// An operation that needs an active session, or that would remove it.
    Authorization,
    /// An external firewall script step failed.
    ExternalCommand,
    /// The store document on disk is malformed.
    CorruptStore,
    /// A problem with the client connection itself.
    Connection,
    /// Anything else.
    Internal,
}

/// The main error enum, representing all possible failures within the server.
///
/// The `Display` text is what the client sees in the `message` field of an error
/// response, so user-facing variants carry Portuguese messages.
#[derive(Error, Debug, Clone)]
pub enum FwGateError {
    #[error("invalid command")]
    InvalidCommand,

    #[error("número de argumentos inválido para '{0}'")]
    WrongArgumentCount(String),

    #[error("ação '{action}' desconhecida para o comando '{command}'")]
    UnknownSubcommand { command: String, action: String },

    #[error("{0}")]
    Syntax(String),

    #[error("ação '{0}' inválida, use ACCEPT ou DENY")]
    InvalidAction(String),

    #[error("usuário não encontrado")]
    UserNotFound,

    #[error("regra não encontrada")]
    RuleNotFound,

    #[error("nenhum usuário cadastrado")]
    NoUsers,

    #[error("nenhuma regra cadastrada")]
    NoRules,

    #[error("o email '{0}' já está cadastrado")]
    EmailAlreadyRegistered(String),

    #[error("já existe uma regra para o endereço '{0}'")]
    DuplicateRule(String),

    #[error("já existe um usuário logado")]
    AlreadyLoggedIn,

    #[error("nenhum usuário logado")]
    NotLoggedIn,

    #[error("email ou senha incorretos")]
    InvalidCredentials,

    #[error("é necessário estar logado para executar este comando")]
    LoginRequired,

    #[error("não é possível remover o usuário logado")]
    RemovingLoggedInUser,

    #[error("o firewall já está ativo")]
    FirewallAlreadyStarted,

    #[error("script execution failed")]
    ScriptFailed,

    #[error("base de dados corrompida: {0}")]
    CorruptStore(String),

    #[error("erro de E/S: {0}")]
    Io(Arc<std::io::Error>),

    #[error("comando não está em UTF-8 válido")]
    InvalidUtf8,

    #[error("comando excede o limite de {0} bytes")]
    CommandTooLong(usize),

    #[error("erro interno: {0}")]
    Internal(String),
}

impl FwGateError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCommand
            | Self::WrongArgumentCount(_)
            | Self::UnknownSubcommand { .. }
            | Self::Syntax(_)
            | Self::InvalidAction(_) => ErrorKind::Validation,
            Self::UserNotFound | Self::RuleNotFound | Self::NoUsers | Self::NoRules => {
                ErrorKind::NotFound
            }
            Self::EmailAlreadyRegistered(_)
            | Self::DuplicateRule(_)
            | Self::AlreadyLoggedIn
            | Self::NotLoggedIn
            | Self::FirewallAlreadyStarted => ErrorKind::Conflict,
            Self::InvalidCredentials | Self::LoginRequired | Self::RemovingLoggedInUser => {
                ErrorKind::Authorization
            }
            Self::ScriptFailed => ErrorKind::ExternalCommand,
            Self::CorruptStore(_) => ErrorKind::CorruptStore,
            Self::Io(_) | Self::InvalidUtf8 | Self::CommandTooLong(_) => ErrorKind::Connection,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<std::io::Error> for FwGateError {
    fn from(e: std::io::Error) -> Self {
        FwGateError::Io(Arc::new(e))
    }
}
