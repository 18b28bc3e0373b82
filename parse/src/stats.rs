use indexmap::map::Entry;
use indexmap::IndexMap;
use std::cell::OnceCell;
use std::fs::File;
use std::io::Write;

use lang::Opcode;

use crate::error::Error;
use crate::parser::Program;

// ----------------------------------------------------------------------------
// Requested statistics

/// One value a stats file can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatKind {
    /// Number of instructions.
    Loc,
    /// Number of lines with a comment.
    Comments,
    Labels,
    Jumps,
    FwJumps,
    BackJumps,
    BadJumps,
    /// Opcodes ordered from most to least frequent.
    Frequent,
    /// Literal text.
    Print(String),
    /// A blank line.
    Eol,
}

/// A stats output file and the values to write into it, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatFile {
    pub path: String,
    pub items: Vec<StatKind>,
}

impl StatFile {
    /// Parses a `FILE=VALUE,VALUE,...` command line specification.
    pub fn parse(s: &str) -> Result<StatFile, String> {
        let Some((path, spec)) = s.split_once('=') else {
            return Err(format!("Missing '=' in stats specification '{s}'"));
        };
        let mut items = Vec::new();
        for item in spec.split(',') {
            items.push(match item {
                "loc" => StatKind::Loc,
                "comments" => StatKind::Comments,
                "labels" => StatKind::Labels,
                "jumps" => StatKind::Jumps,
                "fwjumps" => StatKind::FwJumps,
                "backjumps" => StatKind::BackJumps,
                "badjumps" => StatKind::BadJumps,
                "frequent" => StatKind::Frequent,
                "eol" => StatKind::Eol,
                _ => match item.strip_prefix("print:") {
                    Some(text) => StatKind::Print(text.to_string()),
                    None => return Err(format!("Unknown stat value '{item}'")),
                },
            });
        }
        Ok(StatFile {
            path: path.to_string(),
            items,
        })
    }
}

// ----------------------------------------------------------------------------
// Jump topology and opcode frequency

/// Marker for a label name during the jump scan.
enum Mark {
    /// Jumped to n times before any definition so far.
    Pending(u32),
    Defined,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub labels: u32,
    pub jumps: u32,
    pub fwjumps: u32,
    pub backjumps: u32,
    pub badjumps: u32,
    /// Opcodes by descending occurrence count, ties by first occurrence.
    pub frequent: Vec<Opcode>,
}

impl Analysis {
    /// Single forward pass over the instruction list. Label operands are
    /// present on every jump here because the instructions are validated.
    fn examine(program: &Program) -> Analysis {
        let mut res = Analysis::default();
        let mut marks: IndexMap<&str, Mark> = IndexMap::new();
        let mut freqs: IndexMap<Opcode, u32> = IndexMap::new();

        for inst in &program.instructions {
            *freqs.entry(inst.opcode).or_insert(0) += 1;

            match inst.opcode {
                // a definition resolves every pending jump as forward
                Opcode::LABEL => {
                    res.labels += 1;
                    let name = inst.args[0].value.as_str();
                    if let Some(Mark::Pending(n)) = marks.get(name) {
                        res.fwjumps += *n;
                    }
                    marks.insert(name, Mark::Defined);
                }
                Opcode::CALL | Opcode::JUMP | Opcode::JUMPIFEQ | Opcode::JUMPIFNEQ => {
                    res.jumps += 1;
                    match marks.entry(inst.args[0].value.as_str()) {
                        Entry::Vacant(e) => {
                            e.insert(Mark::Pending(1));
                        }
                        Entry::Occupied(mut e) => match e.get_mut() {
                            Mark::Defined => res.backjumps += 1,
                            Mark::Pending(n) => *n += 1,
                        },
                    }
                }
                // a return is a jump whose direction cannot be decided
                Opcode::RETURN => res.jumps += 1,
                _ => {}
            }
        }

        // jumps that never found their label
        for mark in marks.values() {
            if let Mark::Pending(n) = mark {
                res.badjumps += *n;
            }
        }

        let mut ranked: Vec<(Opcode, u32)> = freqs.into_iter().collect();
        // stable sort keeps first-seen order among equal counts
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        res.frequent = ranked.into_iter().map(|(op, _)| op).collect();
        res
    }
}

// ----------------------------------------------------------------------------
// Stats

/// Statistics over a parsed program. The jump topology and frequency
/// ranking are examined lazily, at most once.
pub struct Stats<'a> {
    program: &'a Program,
    analysis: OnceCell<Analysis>,
}

impl<'a> Stats<'a> {
    pub fn new(program: &'a Program) -> Self {
        Stats {
            program,
            analysis: OnceCell::new(),
        }
    }

    pub fn analysis(&self) -> &Analysis {
        self.analysis.get_or_init(|| Analysis::examine(self.program))
    }

    pub fn value(&self, kind: &StatKind) -> String {
        match kind {
            StatKind::Loc => self.program.instructions.len().to_string(),
            StatKind::Comments => self.program.comments.to_string(),
            StatKind::Print(text) => text.clone(),
            StatKind::Eol => String::new(),
            StatKind::Labels => self.analysis().labels.to_string(),
            StatKind::Jumps => self.analysis().jumps.to_string(),
            StatKind::FwJumps => self.analysis().fwjumps.to_string(),
            StatKind::BackJumps => self.analysis().backjumps.to_string(),
            StatKind::BadJumps => self.analysis().badjumps.to_string(),
            StatKind::Frequent => {
                let names: Vec<String> =
                    self.analysis().frequent.iter().map(|op| op.to_string()).collect();
                names.join(",")
            }
        }
    }

    /// Writes one line per requested value, in order.
    pub fn render<W: Write>(&self, items: &[StatKind], out: &mut W) -> std::io::Result<()> {
        for item in items {
            writeln!(out, "{}", self.value(item))?;
        }
        Ok(())
    }

    pub fn write(&self, file: &StatFile) -> Result<(), Error> {
        let mut out =
            File::create(&file.path).map_err(|e| Error::FileCreate(file.path.clone(), e))?;
        self.render(&file.items, &mut out)
            .map_err(|e| Error::FileWrite(file.path.clone(), e))
    }
}
