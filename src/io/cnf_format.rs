use crate::{Cnf, Literal, VarSet, WeightFormat};
use anyhow::{anyhow, Context, Result};
use log::{debug, info, trace, warn};
use rustc_hash::FxHashMap;
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    str::{FromStr, SplitWhitespace},
};

/// The distinguished path string designating standard input in [`Reader::read_path`].
pub const STDIN_PATH: &str = "-";

/// A structure used to read weighted CNF instances.
///
/// The reader is configured with the [`WeightFormat`] the instance is written in.
/// All the dialects share the DIMACS skeleton
/// (a `p <format> <n-vars> <n-clauses>` problem line followed by zero-terminated clause lines)
/// and differ in the way literal weights and the projection scope are declared:
///
/// - [`Unweighted`](WeightFormat::Unweighted): no weight declaration; every literal gets weight 1;
/// - [`Cachet`](WeightFormat::Cachet): `w <var> <weight>` lines give the weight of positive literals,
///   the negative weight is completed to the complement;
/// - [`Minic2d`](WeightFormat::Minic2d): a single `c weights <w1+> <w1-> <w2+> <w2-> ...` line
///   gives both weights of every declared variable;
/// - [`Wcnf`](WeightFormat::Wcnf): `w <literal> <weight>` lines give per-literal weights,
///   unset weights default to 1;
/// - [`Wpcnf`](WeightFormat::Wpcnf): as `Wcnf`, plus `vp <var> ... 0` lines
///   declaring the additive (projection) variables.
///
/// A trailing `0` on weight lines is optional.
/// Comment lines and blank lines are skipped.
pub struct Reader {
    weight_format: WeightFormat,
}

impl Reader {
    /// Builds a new reader for the given weight format.
    #[must_use]
    pub fn new(weight_format: WeightFormat) -> Self {
        Self { weight_format }
    }

    /// Reads an instance from a file, or from standard input if the path is [`STDIN_PATH`].
    ///
    /// # Errors
    ///
    /// An error is returned if the file cannot be opened
    /// or if the content of the instance does not follow the expected format (see [`read`](Self::read)).
    pub fn read_path(&self, path: &str) -> Result<Cnf> {
        if path == STDIN_PATH {
            info!("reading a cnf instance from stdin (end the input with ctrl-d)");
            let cnf = self.read(std::io::stdin().lock());
            info!("reading a cnf instance from stdin: done");
            cnf
        } else {
            let file =
                File::open(path).with_context(|| format!(r#"while opening file "{path}""#))?;
            self.read(BufReader::new(file))
        }
    }

    /// Reads an instance and returns it.
    ///
    /// # Errors
    ///
    /// An error is returned if the content of the instance does not follow the format
    /// the reader was configured with: among others, a missing or duplicated problem line,
    /// a literal outside the declared variable range, a clause or projection line
    /// terminated prematurely by `0` or not terminated at all,
    /// and a weight declaration the format does not allow are errors.
    /// A mismatch between the configured format and the problem line keyword only raises a warning.
    pub fn read<R>(&self, reader: R) -> Result<Cnf>
    where
        R: Read,
    {
        let mut reader = BufReader::new(reader);
        let mut buffer = String::new();
        let context = "while parsing a cnf instance";
        let mut data = ReaderData::new(self.weight_format);
        let mut line_index = 0;
        loop {
            buffer.clear();
            let line_len = reader
                .read_line(&mut buffer)
                .with_context(|| format!("while reading the line after line {line_index}"))
                .context(context)?;
            if line_len == 0 {
                break;
            }
            line_index += 1;
            trace!("line {line_index}\t{}", buffer.trim_end());
            let line_context = || format!("while parsing line {line_index}");
            let mut words = buffer.split_whitespace();
            let Some(first_word) = words.next() else {
                continue;
            };
            match first_word {
                "p" => data
                    .parse_problem_line(line_index, words)
                    .with_context(line_context)
                    .context(context)?,
                "vp" => data
                    .parse_projection_line(words)
                    .with_context(line_context)
                    .context(context)?,
                "c" => data
                    .parse_comment_line(line_index, words)
                    .with_context(line_context)
                    .context(context)?,
                "w" => data
                    .parse_weight_line(words)
                    .with_context(line_context)
                    .context(context)?,
                _ => data
                    .parse_clause_line(first_word, words)
                    .with_context(line_context)
                    .context(context)?,
            }
        }
        data.finalize(line_index).context(context)
    }
}

struct ReaderData {
    weight_format: WeightFormat,
    declared_var_count: usize,
    declared_clause_count: usize,
    processed_clause_count: usize,
    problem_line_index: Option<usize>,
    weights_line_index: Option<usize>,
    clauses: Vec<Vec<Literal>>,
    literal_weights: FxHashMap<Literal, f64>,
    additive_vars: VarSet,
}

impl ReaderData {
    fn new(weight_format: WeightFormat) -> Self {
        Self {
            weight_format,
            declared_var_count: 0,
            declared_clause_count: 0,
            processed_clause_count: 0,
            problem_line_index: None,
            weights_line_index: None,
            clauses: Vec::new(),
            literal_weights: FxHashMap::default(),
            additive_vars: VarSet::empty(),
        }
    }

    fn parse_problem_line(&mut self, line_index: usize, words: SplitWhitespace) -> Result<()> {
        if let Some(previous) = self.problem_line_index {
            return Err(anyhow!(
                "multiple problem lines, at indices {previous} and {line_index}"
            ));
        }
        self.problem_line_index = Some(line_index);
        let words = words.collect::<Vec<_>>();
        if words.len() != 3 {
            return Err(anyhow!(
                "a problem line must have exactly 4 words, got {}",
                words.len() + 1
            ));
        }
        let expected = self.weight_format.problem_word();
        if words[0] != expected {
            warn!(
                r#"expected "{expected}" on the problem line, found "{}""#,
                words[0]
            );
        }
        self.declared_var_count =
            usize::from_str(words[1]).context("while parsing the declared variable count")?;
        self.declared_clause_count =
            usize::from_str(words[2]).context("while parsing the declared clause count")?;
        Ok(())
    }

    fn parse_projection_line(&mut self, words: SplitWhitespace) -> Result<()> {
        if self.weight_format != WeightFormat::Wpcnf {
            return Ok(());
        }
        let words = words.collect::<Vec<_>>();
        for (i, word) in words.iter().enumerate() {
            let num = isize::from_str(word).context("while parsing a projection variable")?;
            if num < 0 || num.unsigned_abs() > self.declared_var_count {
                return Err(anyhow!(
                    "projection variable {num} inconsistent with the declared variable count {}",
                    self.declared_var_count
                ));
            }
            if num == 0 {
                if i != words.len() - 1 {
                    return Err(anyhow!("projection variables terminated prematurely by '0'"));
                }
            } else {
                self.additive_vars.insert(num.unsigned_abs() - 1);
            }
        }
        Ok(())
    }

    fn parse_comment_line(&mut self, line_index: usize, mut words: SplitWhitespace) -> Result<()> {
        if self.weight_format != WeightFormat::Minic2d || words.next() != Some("weights") {
            return Ok(());
        }
        if self.problem_line_index.is_none() {
            return Err(anyhow!("no problem line before the weights line"));
        }
        if let Some(previous) = self.weights_line_index {
            return Err(anyhow!(
                "multiple weights lines, at indices {previous} and {line_index}"
            ));
        }
        self.weights_line_index = Some(line_index);
        let words = words.collect::<Vec<_>>();
        if words.len() != 2 * self.declared_var_count {
            return Err(anyhow!(
                "a weights line must give exactly 2 weights per declared variable"
            ));
        }
        for var_index in 0..self.declared_var_count {
            self.literal_weights
                .insert(Literal::positive(var_index), parse_weight(words[2 * var_index])?);
            self.literal_weights.insert(
                Literal::negative(var_index),
                parse_weight(words[2 * var_index + 1])?,
            );
        }
        Ok(())
    }

    fn parse_weight_line(&mut self, words: SplitWhitespace) -> Result<()> {
        if self.problem_line_index.is_none() {
            return Err(anyhow!("no problem line before a weight line"));
        }
        let words = words.collect::<Vec<_>>();
        let well_formed = words.len() == 2 || (words.len() == 3 && words[2] == "0");
        match self.weight_format {
            WeightFormat::Cachet if well_formed => {
                let var = isize::from_str(words[0]).context("while parsing a weighted variable")?;
                if var <= 0 || var.unsigned_abs() > self.declared_var_count {
                    return Err(anyhow!(
                        "variable {var} inconsistent with the declared variable count {}",
                        self.declared_var_count
                    ));
                }
                self.literal_weights.insert(
                    Literal::positive(var.unsigned_abs() - 1),
                    parse_weight(words[1])?,
                );
                Ok(())
            }
            WeightFormat::Wcnf | WeightFormat::Wpcnf if well_formed => {
                let literal =
                    isize::from_str(words[0]).context("while parsing a weighted literal")?;
                if literal == 0 || literal.unsigned_abs() > self.declared_var_count {
                    return Err(anyhow!(
                        "literal {literal} inconsistent with the declared variable count {}",
                        self.declared_var_count
                    ));
                }
                self.literal_weights
                    .insert(Literal::from(literal), parse_weight(words[1])?);
                Ok(())
            }
            _ => Err(anyhow!(
                "a weight line is inconsistent with the {} format",
                self.weight_format
            )),
        }
    }

    fn parse_clause_line<'a>(&mut self, first_word: &'a str, words: SplitWhitespace<'a>) -> Result<()> {
        if self.problem_line_index.is_none() {
            return Err(anyhow!("no problem line before a clause line"));
        }
        let mut clause = Vec::new();
        let mut terminated = false;
        for word in std::iter::once(first_word).chain(words) {
            if terminated {
                return Err(anyhow!("clause terminated prematurely by '0'"));
            }
            let num = isize::from_str(word).context("while parsing a literal")?;
            if num.unsigned_abs() > self.declared_var_count {
                return Err(anyhow!(
                    "literal {num} inconsistent with the declared variable count {}",
                    self.declared_var_count
                ));
            }
            if num == 0 {
                terminated = true;
            } else {
                clause.push(Literal::from(num));
            }
        }
        if !terminated {
            return Err(anyhow!("missing end-of-clause indicator '0'"));
        }
        self.clauses.push(clause);
        self.processed_clause_count += 1;
        Ok(())
    }

    fn finalize(mut self, last_line_index: usize) -> Result<Cnf> {
        if self.problem_line_index.is_none() {
            return Err(anyhow!(
                "no problem line before the end of the input, at line {last_line_index}"
            ));
        }
        if self.weight_format != WeightFormat::Wpcnf {
            self.additive_vars = VarSet::new_all_set(self.declared_var_count);
        }
        match self.weight_format {
            WeightFormat::Minic2d => {
                if self.weights_line_index.is_none() {
                    return Err(anyhow!("no weights line before the end of the input"));
                }
            }
            WeightFormat::Unweighted => {
                for var_index in 0..self.declared_var_count {
                    self.literal_weights.insert(Literal::positive(var_index), 1.);
                    self.literal_weights.insert(Literal::negative(var_index), 1.);
                }
            }
            WeightFormat::Cachet => {
                for var_index in 0..self.declared_var_count {
                    let declared = self
                        .literal_weights
                        .get(&Literal::positive(var_index))
                        .copied()
                        .unwrap_or(0.5);
                    // -1 is the Cachet marker for an unweighted variable
                    let (positive_weight, negative_weight) = if declared == -1. {
                        (1., 1.)
                    } else {
                        (declared, 1. - declared)
                    };
                    self.literal_weights
                        .insert(Literal::positive(var_index), positive_weight);
                    self.literal_weights
                        .insert(Literal::negative(var_index), negative_weight);
                }
            }
            WeightFormat::Wcnf | WeightFormat::Wpcnf => {
                for var_index in 0..self.declared_var_count {
                    self.literal_weights
                        .entry(Literal::positive(var_index))
                        .or_insert(1.);
                    self.literal_weights
                        .entry(Literal::negative(var_index))
                        .or_insert(1.);
                }
            }
        }
        for var_index in 0..self.declared_var_count {
            for literal in [Literal::positive(var_index), Literal::negative(var_index)] {
                let weight = self.literal_weights[&literal];
                if weight <= 0. {
                    warn!("literal {literal} has weight {weight}");
                }
            }
        }
        let declared_clause_count = self.declared_clause_count;
        let processed_clause_count = self.processed_clause_count;
        let cnf = Cnf::from_raw_data(
            self.weight_format,
            self.declared_var_count,
            self.clauses,
            self.literal_weights,
            self.additive_vars,
        );
        debug!(
            "declared variable count: {}, apparent variable count: {}",
            cnf.declared_var_count(),
            cnf.apparent_vars().len()
        );
        debug!(
            "declared clause count: {declared_clause_count}, processed clause count: {processed_clause_count}"
        );
        Ok(cnf)
    }
}

fn parse_weight(word: &str) -> Result<f64> {
    f64::from_str(word).context("while parsing a literal weight")
}
