use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use rqtrees::{union_area, RangeAccumulator, Rect, SparseTable, WaveletTree};

/// Answer range queries over literal arrays.
#[derive(Parser, Debug)]
#[command(name = "rqtool", version, about)]
struct Cli {
    /// Log construction and conversion details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// An inclusive range of positions.
#[derive(Args, Debug)]
struct Span {
    #[arg(long)]
    lo: usize,
    #[arg(long)]
    hi: usize,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Minimum and its earliest position in lo..=hi
    Rmq {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
        #[command(flatten)]
        span: Span,
    },
    /// The k-th smallest value in lo..=hi
    Kth {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
        #[command(flatten)]
        span: Span,
        #[arg(long)]
        k: usize,
    },
    /// How many values in lo..=hi are <= x, and how many equal x
    Count {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
        #[command(flatten)]
        span: Span,
        #[arg(long, allow_negative_numbers = true)]
        x: i64,
    },
    /// Apply range additions to an array of zeroes, then sum a range
    Accumulate {
        #[arg(long)]
        size: usize,
        /// lo,hi,value
        #[arg(long = "add", value_parser = parse_triple)]
        adds: Vec<(usize, usize, i64)>,
        /// lo,hi
        #[arg(long, value_parser = parse_pair)]
        query: (usize, usize),
    },
    /// Area of the union of rectangles given as x1,y1,x2,y2
    UnionArea {
        #[arg(value_parser = parse_rect)]
        rects: Vec<Rect<i64>>,
    },
}

fn parse_fields<T: std::str::FromStr>(s: &str, expected: usize) -> Result<Vec<T>, String>
where
    T::Err: std::fmt::Display,
{
    let fields = s
        .split(',')
        .map(|field| field.trim().parse::<T>().map_err(|e| format!("{field:?}: {e}")))
        .collect::<Result<Vec<T>, String>>()?;
    if fields.len() != expected {
        return Err(format!(
            "expected {expected} comma separated numbers, got {}",
            fields.len()
        ));
    }
    Ok(fields)
}

fn parse_pair(s: &str) -> Result<(usize, usize), String> {
    let f = parse_fields::<usize>(s, 2)?;
    Ok((f[0], f[1]))
}

fn parse_triple(s: &str) -> Result<(usize, usize, i64), String> {
    let (lo, hi) = s
        .rsplit_once(',')
        .ok_or_else(|| "expected lo,hi,value".to_string())?;
    let (a, b) = parse_pair(lo)?;
    let value = hi.trim().parse::<i64>().map_err(|e| e.to_string())?;
    Ok((a, b, value))
}

fn parse_rect(s: &str) -> Result<Rect<i64>, String> {
    let f = parse_fields::<i64>(s, 4)?;
    Ok(Rect::from((f[0], f[1], f[2], f[3])))
}

fn run(command: Command) -> Result<String> {
    let output = match command {
        Command::Rmq { values, span } => {
            let table = SparseTable::new(&values).context("building sparse table")?;
            let at = table.arg_min(span.lo, span.hi)?;
            format!("min {} at {}", values[at], at)
        }
        Command::Kth { values, span, k } => {
            let tree = WaveletTree::new(&values).context("building wavelet tree")?;
            tree.kth(span.lo, span.hi, k)?.to_string()
        }
        Command::Count { values, span, x } => {
            let tree = WaveletTree::new(&values).context("building wavelet tree")?;
            let at_most = tree.count_less_equal(span.lo, span.hi, x)?;
            let equal = tree.count(span.lo, span.hi, x)?;
            format!("<= {x}: {at_most}, == {x}: {equal}")
        }
        Command::Accumulate { size, adds, query } => {
            let mut acc = RangeAccumulator::<i64>::new(size);
            for (lo, hi, value) in adds {
                acc.add_inclusive(lo, hi, value)
                    .with_context(|| format!("adding {value} to {lo}..={hi}"))?;
            }
            acc.query_inclusive(query.0, query.1)?.to_string()
        }
        Command::UnionArea { rects } => union_area(&rects)?.to_string(),
    };
    Ok(output)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let output = run(cli.command)?;
    println!("{output}");
    Ok(())
}
