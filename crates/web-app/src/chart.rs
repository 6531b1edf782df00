use chrono::{Days, NaiveDate};
use gymlog_domain as domain;
use plotters::{
    chart::ChartBuilder,
    prelude::{Circle, DrawingAreaErrorKind, IntoDrawingArea, SVGBackend},
    series::LineSeries,
    style::{Color, IntoFont, Palette, Palette99, RGBColor, TextStyle, WHITE},
};

pub const COLOR_WEIGHT: usize = 8;
pub const COLOR_VOLUME: usize = 6;

pub const OPACITY_LINE: f64 = 0.9;

pub const WIDTH_LINE: u32 = 2;
pub const SIZE_CIRCLE: u32 = 3;

pub const HEIGHT: u32 = 200;
pub const MIN_WIDTH: u32 = 300;
pub const MAX_WIDTH: u32 = 960;

pub const FONT: (&str, u32) = ("Roboto", 11);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl Interval {
    /// The smallest interval containing all `dates`, widened by a day on each
    /// side if all dates are equal.
    pub fn covering(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        let mut dates = dates.into_iter();
        let first = dates.next()?;
        let (first, last) = dates.fold((first, first), |(min, max), d| (min.min(d), max.max(d)));
        if first == last {
            return Some(Self {
                first: first.checked_sub_days(Days::new(1)).unwrap_or(first),
                last: last.checked_add_days(Days::new(1)).unwrap_or(last),
            });
        }
        Some(Self { first, last })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlotType {
    Circle(usize, f64, u32),
    Line(usize, f64, u32),
}

#[must_use]
pub fn plot_line_with_points(color: usize) -> Vec<PlotType> {
    vec![
        PlotType::Line(color, OPACITY_LINE, WIDTH_LINE),
        PlotType::Circle(color, OPACITY_LINE, SIZE_CIRCLE),
    ]
}

#[derive(Debug, Clone)]
pub struct PlotData {
    pub values: Vec<(NaiveDate, f32)>,
    pub plots: Vec<PlotType>,
    pub secondary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    min: f32,
    max: f32,
}

impl Bounds {
    fn max_with_margin(self) -> f32 {
        self.max + self.margin()
    }

    fn margin(self) -> f32 {
        if (self.max - self.min).abs() > f32::EPSILON {
            return (self.max - self.min) * 0.1;
        }
        0.1
    }
}

/// Plot the weight and the volume of an exercise over time.
///
/// The weight is plotted on the primary axis, the volume on the secondary
/// axis. Returns `None` if there is nothing to plot.
#[allow(clippy::missing_errors_doc)]
pub fn plot_exercise_progress(
    stats: &domain::ExerciseStats,
    width: u32,
    theme: &Theme,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let mut rows = stats
        .rows
        .iter()
        .map(|r| (r.date.date_naive(), r.weight.max(0.0), r.volume()))
        .collect::<Vec<_>>();
    rows.sort_by_key(|(date, _, _)| *date);

    let Some(interval) = Interval::covering(rows.iter().map(|(date, _, _)| *date)) else {
        return Ok(None);
    };

    plot(
        &[
            PlotData {
                values: rows.iter().map(|(date, weight, _)| (*date, *weight)).collect(),
                plots: plot_line_with_points(COLOR_WEIGHT),
                secondary: false,
            },
            PlotData {
                values: rows.iter().map(|(date, _, volume)| (*date, *volume)).collect(),
                plots: plot_line_with_points(COLOR_VOLUME),
                secondary: true,
            },
        ],
        &interval,
        width,
        theme,
    )
}

/// Plot series of values onto a chart.
///
/// Every element of `data` is drawn with each of its plot types in order,
/// either on the primary or on the secondary axis. Both axes start at zero.
#[allow(clippy::missing_errors_doc)]
pub fn plot(
    data: &[PlotData],
    interval: &Interval,
    width: u32,
    theme: &Theme,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let (Some(primary_bounds), secondary_bounds) = determine_y_bounds(data) else {
        return Ok(None);
    };

    let mut result = String::new();

    {
        let root = SVGBackend::with_string(&mut result, (chart_width(width), HEIGHT))
            .into_drawing_area();
        let (color, background_color) = colors(theme);

        root.fill(&background_color)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(10f32)
            .x_label_area_size(30f32)
            .y_label_area_size(40f32)
            .right_y_label_area_size(secondary_bounds.map_or_else(|| 0f32, |_| 40f32))
            .build_cartesian_2d(
                interval.first..interval.last,
                0f32..primary_bounds.max_with_margin(),
            )?
            .set_secondary_coord(
                interval.first..interval.last,
                secondary_bounds.map_or(0.0..0.0, |b| 0f32..b.max_with_margin()),
            );

        chart
            .configure_mesh()
            .disable_x_mesh()
            .set_all_tick_mark_size(3u32)
            .axis_style(color.mix(0.3))
            .bold_line_style(color.mix(0.05))
            .light_line_style(color.mix(0.0))
            .label_style(TextStyle::from(FONT.into_font()).color(&color))
            .x_labels(2)
            .y_labels(6)
            .draw()?;

        if secondary_bounds.is_some() {
            chart
                .configure_secondary_axes()
                .set_all_tick_mark_size(3u32)
                .axis_style(color.mix(0.3))
                .label_style(TextStyle::from(FONT.into_font()).color(&color))
                .draw()?;
        }

        for plot_data in data {
            let mut values = plot_data.values.clone();
            values.sort_by_key(|e| e.0);

            for plot in &plot_data.plots {
                let drawn: Result<(), DrawingAreaErrorKind<std::io::Error>> = match *plot {
                    PlotType::Circle(color, opacity, size) => {
                        let series = values.iter().map(|(x, y)| {
                            Circle::new(
                                (*x, *y),
                                size,
                                Palette99::pick(color).mix(opacity).filled(),
                            )
                        });
                        if plot_data.secondary {
                            chart.draw_secondary_series(series).map(|_| ())
                        } else {
                            chart.draw_series(series).map(|_| ())
                        }
                    }
                    PlotType::Line(color, opacity, size) => {
                        let series = LineSeries::new(
                            values.iter().map(|(x, y)| (*x, *y)),
                            Palette99::pick(color).mix(opacity).stroke_width(size),
                        );
                        if plot_data.secondary {
                            chart.draw_secondary_series(series).map(|_| ())
                        } else {
                            chart.draw_series(series).map(|_| ())
                        }
                    }
                };
                drawn?;
            }
        }

        root.present()?;
    }

    Ok(Some(result))
}

fn colors(theme: &Theme) -> (RGBColor, RGBColor) {
    let dark = RGBColor(20, 22, 26);
    match theme {
        Theme::Light => (dark, WHITE),
        Theme::Dark => (WHITE, dark),
    }
}

fn determine_y_bounds(data: &[PlotData]) -> (Option<Bounds>, Option<Bounds>) {
    let mut primary_bounds: Option<Bounds> = None;
    let mut secondary_bounds: Option<Bounds> = None;

    for plot in data.iter().filter(|plot| !plot.values.is_empty()) {
        let max = plot.values.iter().map(|(_, v)| *v).fold(0., f32::max);

        let b = if plot.secondary {
            &mut secondary_bounds
        } else {
            &mut primary_bounds
        }
        .get_or_insert(Bounds { min: 0., max });

        b.max = f32::max(b.max, max);
    }

    (primary_bounds, secondary_bounds)
}

fn chart_width(available: u32) -> u32 {
    available.saturating_sub(20).clamp(MIN_WIDTH, MAX_WIDTH)
}
