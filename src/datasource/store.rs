//! Series storage combining raw points and bounds tracking.

use crate::datasource::{AppendError, DataMode, DatePoint, SeriesData, expand_bounds};
use crate::view::Range;

/// Append-only series storage with value bounds and generation tracking.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    data: SeriesData,
    bounds: Option<Range>,
    generation: u64,
}

impl SeriesStore {
    /// Create an empty store for date-keyed points.
    pub fn dated() -> Self {
        Self {
            data: SeriesData::Dated(Vec::new()),
            bounds: None,
            generation: 0,
        }
    }

    /// Create an empty store for distribution values.
    pub fn distribution() -> Self {
        Self {
            data: SeriesData::Distribution(Vec::new()),
            bounds: None,
            generation: 0,
        }
    }

    /// Append a dated point.
    pub fn push_date_point(&mut self, point: DatePoint) -> Result<usize, AppendError> {
        let SeriesData::Dated(points) = &mut self.data else {
            return Err(AppendError::WrongMode);
        };
        let index = points.len();
        expand_bounds(&mut self.bounds, point.value);
        points.push(point);
        self.generation = self.generation.wrapping_add(1);
        Ok(index)
    }

    /// Append multiple dated points in order.
    pub fn extend_date_points<I>(&mut self, points: I) -> Result<usize, AppendError>
    where
        I: IntoIterator<Item = DatePoint>,
    {
        let SeriesData::Dated(stored) = &mut self.data else {
            return Err(AppendError::WrongMode);
        };
        let start_len = stored.len();
        for point in points {
            expand_bounds(&mut self.bounds, point.value);
            stored.push(point);
        }
        let added = stored.len() - start_len;
        if added > 0 {
            self.generation = self.generation.wrapping_add(1);
        }
        Ok(added)
    }

    /// Append a distribution value.
    pub fn push_value(&mut self, value: f64) -> Result<usize, AppendError> {
        self.extend_values([value]).map(|_| self.len() - 1)
    }

    /// Append multiple distribution values in order.
    pub fn extend_values<I>(&mut self, values: I) -> Result<usize, AppendError>
    where
        I: IntoIterator<Item = f64>,
    {
        let SeriesData::Distribution(stored) = &mut self.data else {
            return Err(AppendError::WrongMode);
        };
        let values = values.into_iter();
        let (reserve, _) = values.size_hint();
        stored.reserve(reserve);

        let start_len = stored.len();
        for value in values {
            expand_bounds(&mut self.bounds, value);
            stored.push(value);
        }
        let added = stored.len() - start_len;
        if added > 0 {
            self.generation = self.generation.wrapping_add(1);
        }
        Ok(added)
    }

    /// Access the data mode.
    pub fn mode(&self) -> DataMode {
        self.data.mode()
    }

    /// Dated points in insertion order; empty for distributions.
    pub fn date_points(&self) -> &[DatePoint] {
        match &self.data {
            SeriesData::Dated(points) => points,
            SeriesData::Distribution(_) => &[],
        }
    }

    /// Distribution values in insertion order; empty for dated series.
    pub fn values(&self) -> &[f64] {
        match &self.data {
            SeriesData::Distribution(values) => values,
            SeriesData::Dated(_) => &[],
        }
    }

    /// Number of points stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if there are no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Range of finite values stored so far.
    pub fn bounds(&self) -> Option<Range> {
        self.bounds
    }

    /// Access the data generation (increments on append).
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
