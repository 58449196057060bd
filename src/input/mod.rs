//! 指令文件解析
//!
//! 每行一条指令：
//!
//! ```text
//! 0: Insert(5,25)
//! 3: PrintBuilding(5)
//! 9: PrintBuilding(1,100)
//! ```
//!
//! 解析器保证输出的指令格式正确且时间非递减，调度核心不再做这些检查。

use thiserror::Error;

use crate::city::Instruction;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 从 1 开始的行号
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("missing ':' after the timestamp")]
    MissingColon,
    #[error("malformed parameter list in {0:?}")]
    MalformedParams(String),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("unknown command {0:?}")]
    UnknownCommand(String),
    #[error("{command} does not take {got} parameter(s)")]
    WrongArity { command: String, got: usize },
    #[error("job id 0 is reserved")]
    ZeroJobId,
    #[error("timestamp {got} is earlier than the previous instruction ({prev})")]
    TimeWentBackwards { prev: u64, got: u64 },
}

/// 解析整个指令文件；空行会被跳过。
pub fn parse_instructions(src: &str) -> Result<Vec<Instruction>, ParseError> {
    let mut out = Vec::new();
    let mut prev_time = 0;
    for (i, raw) in src.lines().enumerate() {
        let line = i + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let instruction = parse_line(raw).map_err(|kind| ParseError { line, kind })?;
        let time = instruction.time.0;
        if time < prev_time {
            return Err(ParseError {
                line,
                kind: ParseErrorKind::TimeWentBackwards {
                    prev: prev_time,
                    got: time,
                },
            });
        }
        prev_time = time;
        out.push(instruction);
    }
    Ok(out)
}

/// 解析单行指令
pub fn parse_line(raw: &str) -> Result<Instruction, ParseErrorKind> {
    let (time, rest) = raw.split_once(':').ok_or(ParseErrorKind::MissingColon)?;
    let time = parse_number(time)?;

    let rest = rest.trim();
    let (command, params) = rest
        .split_once('(')
        .ok_or_else(|| ParseErrorKind::MalformedParams(rest.to_string()))?;
    let command = command.trim();
    if !matches!(command, "Insert" | "PrintBuilding") {
        return Err(ParseErrorKind::UnknownCommand(command.to_string()));
    }
    let params = params
        .trim_end()
        .strip_suffix(')')
        .ok_or_else(|| ParseErrorKind::MalformedParams(rest.to_string()))?;
    let params = params
        .split(',')
        .map(parse_number)
        .collect::<Result<Vec<_>, _>>()?;

    match (command, params.as_slice()) {
        ("Insert", [0, _]) => Err(ParseErrorKind::ZeroJobId),
        ("Insert", [id, total]) => Ok(Instruction::insert(time, *id, *total)),
        ("PrintBuilding", [id]) => Ok(Instruction::print_one(time, *id)),
        ("PrintBuilding", [low, high]) => Ok(Instruction::print_range(time, *low, *high)),
        _ => Err(ParseErrorKind::WrongArity {
            command: command.to_string(),
            got: params.len(),
        }),
    }
}

fn parse_number(s: &str) -> Result<u64, ParseErrorKind> {
    let s = s.trim();
    s.parse::<u64>()
        .map_err(|_| ParseErrorKind::InvalidNumber(s.to_string()))
}
