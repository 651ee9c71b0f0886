//! Внешние действия, которые оборачивает логгер: приветствие и запуск shell-команд.
//! Сами по себе они ничего не знают о журнале вызовов.

use std::process::Command;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("не удалось запустить `{command}`: {reason}")]
    Spawn { command: String, reason: String },

    #[error("`{command}` завершилась с кодом {code}")]
    ExitCode { command: String, code: i32 },

    #[error("`{command}` прервана сигналом")]
    Killed { command: String },
}

/// Приветствие с именем в title case
pub fn greet(name: &str) -> String {
    format!("Hello and well met {}.", title_case(name))
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Запускает команду через `sh -c` и ждёт завершения. Ненулевой код - ошибка.
pub fn spawn(command: &str) -> Result<i32, ActionError> {
    debug!("Запуск команды: {}", command);
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .status()
        .map_err(|e| ActionError::Spawn {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

    exit_code(command, status)
}

/// То же, что [`spawn`], но без блокировки runtime
pub async fn spawn_async(command: String) -> Result<i32, ActionError> {
    debug!("Асинхронный запуск команды: {}", command);
    let status = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(&command)
        .status()
        .await
        .map_err(|e| ActionError::Spawn {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    exit_code(&command, status)
}

fn exit_code(command: &str, status: std::process::ExitStatus) -> Result<i32, ActionError> {
    match status.code() {
        Some(0) => Ok(0),
        Some(code) => Err(ActionError::ExitCode {
            command: command.to_string(),
            code,
        }),
        None => Err(ActionError::Killed {
            command: command.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greet_title_cases_name() {
        assert_eq!(greet("yogurt"), "Hello and well met Yogurt.");
        assert_eq!(greet("jean-luc PICARD"), "Hello and well met Jean-Luc Picard.");
    }

    #[test]
    fn test_spawn_exit_codes() {
        assert_eq!(spawn("true"), Ok(0));
        assert_eq!(
            spawn("exit 3"),
            Err(ActionError::ExitCode {
                command: "exit 3".to_string(),
                code: 3
            })
        );
    }

    #[tokio::test]
    async fn test_spawn_async_exit_codes() {
        assert_eq!(spawn_async("true".to_string()).await, Ok(0));
        assert!(spawn_async("exit 1".to_string()).await.is_err());
    }
}
