/// Plain numeric series plus the labels a plot or table needs
#[derive(Debug, Clone, PartialEq)]
pub struct PlotView {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub xlabel: String,
    pub ylabel: String,
    pub title: String,
    /// Visible x range; `None` means "fit to data"
    pub xlim: Option<(f64, f64)>,
}

impl PlotView {
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Paired points, truncated to the shorter series
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Smallest and largest finite y, if any
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.y
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_and_range() {
        let view = PlotView {
            x: vec![0.0, 1.0, 2.0],
            y: vec![3.0, -1.0],
            xlabel: "t".into(),
            ylabel: "p".into(),
            title: "demo".into(),
            xlim: None,
        };
        assert_eq!(view.len(), 2);
        assert_eq!(view.points().collect::<Vec<_>>(), vec![(0.0, 3.0), (1.0, -1.0)]);
        assert_eq!(view.y_range(), Some((-1.0, 3.0)));
    }
}
