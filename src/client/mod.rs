// src/client/mod.rs

//! A minimal interactive client: forwards command lines to the server and prints the
//! replies. `help`, `exit` and `clear` are handled locally.

use crate::core::protocol::{Response, ResponseCode};
use crate::core::FwGateError;
use anyhow::Result;
use futures::{SinkExt, StreamExt};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio_util::codec::{Framed, LinesCodec, LinesCodecError};

/// Responses are single JSON lines; this bounds how much the client buffers for one.
const MAX_RESPONSE_LENGTH: usize = 1024 * 1024;

const HELP_TEXT: &str = "\
Lista de comandos:
- Mostrar comandos disponíveis:
$ help

- Sair da aplicação:
$ exit

- Limpar a tela:
$ clear

- Criar um novo usuário no servidor:
$ user create <nome do usuário> <email> <senha>

- Listar todos usuários:
$ user list all

- Remover usuário:
$ user remove <email ou ID>

- Entrar / sair:
$ user login <email> <senha>
$ user logout

- Criar nova regra de firewall:
$ rule add <ip address> <action>, onde action deve ser ACCEPT ou DENY

- Listar regras do firewall:
$ rule list all

- Remover regras do firewall:
$ rule remove <ip ou ID>

- Aplicar regras do firewall
$ firewall start

- Remover regras do firewall
$ firewall stop";

/// Commands answered without contacting the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalCommand {
    Help,
    Exit,
    Clear,
}

impl LocalCommand {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "help" => Some(LocalCommand::Help),
            "exit" => Some(LocalCommand::Exit),
            "clear" => Some(LocalCommand::Clear),
            _ => None,
        }
    }

    /// Runs the command and returns `Stop` for `exit`, `Ok` otherwise.
    pub fn run(self) -> ResponseCode {
        match self {
            LocalCommand::Help => {
                println!("{HELP_TEXT}");
                ResponseCode::Ok
            }
            LocalCommand::Exit => ResponseCode::Stop,
            LocalCommand::Clear => {
                print!("\x1B[2J\x1B[1;1H");
                let _ = std::io::stdout().flush();
                ResponseCode::Ok
            }
        }
    }
}

/// A connection to an fwgate server.
pub struct Client {
    framed: Framed<TcpStream, LinesCodec>,
    server_address: String,
}

impl Client {
    pub async fn connect(server_address: &str) -> Result<Self, FwGateError> {
        let socket = TcpStream::connect(server_address).await?;
        Ok(Self {
            framed: Framed::new(socket, LinesCodec::new_with_max_length(MAX_RESPONSE_LENGTH)),
            server_address: server_address.to_string(),
        })
    }

    pub fn server_address(&self) -> &str {
        &self.server_address
    }

    /// Sends one command line and waits for its response.
    pub async fn send(&mut self, line: &str) -> Result<Response, FwGateError> {
        self.framed.send(line.trim()).await.map_err(codec_error)?;
        match self.framed.next().await {
            Some(Ok(raw)) => serde_json::from_str(&raw)
                .map_err(|e| FwGateError::Internal(format!("malformed server response: {e}"))),
            Some(Err(e)) => Err(codec_error(e)),
            None => Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into()),
        }
    }
}

fn codec_error(e: LinesCodecError) -> FwGateError {
    match e {
        LinesCodecError::Io(io_err) => io_err.into(),
        LinesCodecError::MaxLineLengthExceeded => {
            FwGateError::Internal("server response too long".to_string())
        }
    }
}

fn print_response(response: &Response) {
    let label = match response.code {
        ResponseCode::Ok => "SUCESSO",
        _ => "FALHA",
    };
    println!("{label}\n{}\n{}", "=".repeat(15), response.message);
}

/// Reads lines from stdin until `exit` or end of input.
pub async fn run_interactive(server_address: &str) -> Result<()> {
    let mut client = Client::connect(server_address).await?;
    println!("Iniciando conexão com {}", client.server_address());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        if let Some(local) = LocalCommand::parse(&line) {
            if local.run() == ResponseCode::Stop {
                break;
            }
            continue;
        }

        let response = client.send(&line).await?;
        print_response(&response);
        if response.code == ResponseCode::Error {
            println!("Houve algum erro ao executar o comando, tente novamente!");
        }
    }

    println!("Finalizando conexão com {}", client.server_address());
    Ok(())
}
