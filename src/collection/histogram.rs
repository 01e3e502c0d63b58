use super::HistogramLayout;

use std::fmt::{Display, Formatter};

/// Fixed-width histogram with running summary statistics.
///
/// Values below the layout's `low` land in an underflow bucket and values at or beyond the last bucket's upper edge in
/// an overflow bucket, so every recorded value is counted exactly once.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    name: String,
    layout: HistogramLayout,
    buckets: Vec<u64>,
    underflow: u64,
    overflow: u64,
    count: u64,
    sum: f64,
    sum_of_squares: f64,
    min: f64,
    max: f64,
}

impl Histogram {
    pub fn new(name: impl Into<String>, layout: HistogramLayout) -> Self {
        Self {
            name: name.into(),
            buckets: vec![0; layout.count],
            layout,
            underflow: 0,
            overflow: 0,
            count: 0,
            sum: 0.0,
            sum_of_squares: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn record(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_of_squares += value * value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);

        if value < self.layout.low {
            self.underflow += 1;
            return;
        }
        let index = ((value - self.layout.low) / self.layout.step).floor();
        match self.buckets.get_mut(index as usize) {
            Some(bucket) if index < self.layout.count as f64 => *bucket += 1,
            _ => self.overflow += 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Counts of the regular buckets, lowest first.
    pub fn buckets(&self) -> &[u64] {
        &self.buckets
    }

    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// Number of values recorded; equals the sum over all buckets including under- and overflow.
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }

    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }

    /// Sample standard deviation; needs at least two values.
    pub fn std_dev(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as f64;
        let variance = (self.sum_of_squares - self.sum * self.sum / n) / (n - 1.0);
        Some(variance.max(0.0).sqrt())
    }

    fn write_row(&self, f: &mut Formatter<'_>, from: f64, to: f64, n: u64) -> std::fmt::Result {
        let relative = if self.count == 0 {
            0.0
        } else {
            n as f64 / self.count as f64
        };
        writeln!(f, "| {from:>10.3} | {to:>10.3} | {n:>10} | {relative:>10.6} |")
    }
}

impl Display for Histogram {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rule = "+------------+------------+------------+------------+";
        writeln!(f, "{rule}")?;
        writeln!(f, "| HISTOGRAM {:<41}|", self.name)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "|  Number of records = {}", self.count)?;
        if let (Some(min), Some(max), Some(mean)) = (self.min(), self.max(), self.mean()) {
            writeln!(f, "|  Min = {min:.6}  Max = {max:.6}")?;
            writeln!(f, "|  Average value = {mean:.6}")?;
        }
        if let Some(std_dev) = self.std_dev() {
            writeln!(f, "|  Standard deviation = {std_dev:.6}")?;
        }
        writeln!(f, "{rule}")?;
        writeln!(f, "| {:^10} | {:^10} | {:^10} | {:^10} |", "from", "to", "n", "rel")?;
        writeln!(f, "{rule}")?;

        let HistogramLayout { low, step, .. } = self.layout;
        if self.underflow > 0 {
            self.write_row(f, f64::NEG_INFINITY, low, self.underflow)?;
        }
        for (i, &n) in self.buckets.iter().enumerate() {
            let from = low + step * i as f64;
            self.write_row(f, from, from + step, n)?;
        }
        if self.overflow > 0 {
            let top = low + step * self.buckets.len() as f64;
            self.write_row(f, top, f64::INFINITY, self.overflow)?;
        }
        write!(f, "{rule}")
    }
}
