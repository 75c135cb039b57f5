//! Text rendering of the exploration report
//!
//! Every view is printed as a titled, fixed-width table. Missing values are
//! shown as `N/A`. The overview's `StdDev` column is the sample standard
//! deviation (`n - 1`), the figure pandas `describe` prints.

use std::io::{self, Write};

use engagement_analysis::{
    crosstab::CrossTab, distribution::ClassDistribution, heatmap::EngagementHeatmap,
    overview::DatasetOverview, relationship::SessionsVsPlaytime, report::ExplorationReport,
    segment::SegmentCounts, spread::GenreSessionDuration,
};

const LABEL_WIDTH: usize = 28;
const CELL_WIDTH: usize = 12;

pub(super) fn write_report<W>(out: &mut W, report: &ExplorationReport) -> io::Result<()>
where
    W: Write,
{
    write_overview(out, &report.overview)?;
    write_distribution(out, &report.class_distribution)?;
    write_relationship(out, &report.sessions_vs_playtime)?;
    write_spread(out, &report.genre_session_duration)?;
    write_crosstab(
        out,
        "Game difficulty by genre (row proportions)",
        &report.genre_difficulty,
    )?;
    write_segments(
        out,
        "Player type by engagement level",
        "Player type",
        &report.player_type_engagement,
    )?;
    write_segments(
        out,
        "Session length (minutes) by in-game purchases",
        "Session length",
        &report.session_length_purchases,
    )?;
    write_heatmap(out, &report.level_achievement_heatmap)?;
    Ok(())
}

fn write_title<W>(out: &mut W, title: &str) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "=".repeat(title.len()))
}

fn write_header<W, S>(out: &mut W, label: &str, columns: &[S]) -> io::Result<()>
where
    W: Write,
    S: AsRef<str>,
{
    write!(out, "  {label:<LABEL_WIDTH$}")?;
    for column in columns {
        write!(out, " {:>CELL_WIDTH$}", column.as_ref())?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        "-".repeat(LABEL_WIDTH + columns.len() * (CELL_WIDTH + 1))
    )
}

fn write_excluded<W>(out: &mut W, excluded: usize) -> io::Result<()>
where
    W: Write,
{
    if excluded > 0 {
        writeln!(out, "  ({excluded} rows excluded from this view)")?;
    }
    writeln!(out)
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "N/A".to_owned(), |v| format!("{v:.precision$}"))
}

fn write_overview<W>(out: &mut W, overview: &DatasetOverview) -> io::Result<()>
where
    W: Write,
{
    write_title(out, "Dataset overview")?;
    writeln!(
        out,
        "  {} rows, {} columns: {}",
        overview.rows,
        overview.columns.len(),
        overview.columns.join(", ")
    )?;
    writeln!(out)?;
    write_header(
        out,
        "Column",
        &["Count", "Missing", "Min", "Max", "Mean", "Median", "StdDev"],
    )?;
    for summary in &overview.numeric {
        let stats = summary.stats.as_ref();
        writeln!(
            out,
            "  {:<LABEL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$}",
            summary.column,
            stats.map_or(0, |s| s.count),
            summary.missing,
            fmt_opt(stats.map(|s| s.min), 2),
            fmt_opt(stats.map(|s| s.max), 2),
            fmt_opt(stats.map(|s| s.mean), 2),
            fmt_opt(stats.map(|s| s.median), 2),
            fmt_opt(stats.and_then(|s| s.sample_std_dev), 2),
        )?;
    }
    writeln!(out)
}

fn write_distribution<W>(out: &mut W, distribution: &ClassDistribution) -> io::Result<()>
where
    W: Write,
{
    write_title(out, "Engagement level distribution")?;
    write_header(out, "Engagement level", &["Players", "Percent"])?;
    for share in &distribution.shares {
        writeln!(
            out,
            "  {:<LABEL_WIDTH$} {:>CELL_WIDTH$} {:>w$.2}%",
            share.label,
            share.count,
            share.percent,
            w = CELL_WIDTH - 1,
        )?;
    }
    writeln!(out, "  Total: {} players", distribution.total)?;
    write_excluded(out, distribution.excluded)
}

fn write_relationship<W>(out: &mut W, relationship: &SessionsVsPlaytime) -> io::Result<()>
where
    W: Write,
{
    write_title(out, "Sessions per week vs play time (hours)")?;
    write_header(out, "Sessions per week", &["Players", "Mean hours"])?;
    for group in &relationship.group_means {
        writeln!(
            out,
            "  {:<LABEL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$.2}",
            group.sessions_per_week, group.count, group.mean_play_time_hours,
        )?;
    }
    match &relationship.fit {
        Some(fit) => writeln!(
            out,
            "  Fit: PlayTimeHours = {:.4} * SessionsPerWeek + {:.4} (r = {:.3}, n = {})",
            fit.slope, fit.intercept, fit.correlation, fit.count
        )?,
        None => writeln!(out, "  Fit: N/A")?,
    }
    write_excluded(out, relationship.excluded)
}

fn write_spread<W>(out: &mut W, spread: &GenreSessionDuration) -> io::Result<()>
where
    W: Write,
{
    write_title(out, "Average session duration (minutes) by genre")?;
    write_header(
        out,
        "Genre",
        &["Players", "Min", "Q1", "Median", "Q3", "Max", "Mean"],
    )?;
    for genre in &spread.genres {
        let s = &genre.summary;
        writeln!(
            out,
            "  {:<LABEL_WIDTH$} {:>CELL_WIDTH$} {:>CELL_WIDTH$.1} {:>CELL_WIDTH$.1} {:>CELL_WIDTH$.1} {:>CELL_WIDTH$.1} {:>CELL_WIDTH$.1} {:>CELL_WIDTH$.1}",
            genre.genre, genre.count, s.min, s.q1, s.median, s.q3, s.max, genre.mean,
        )?;
    }
    write_excluded(out, spread.excluded)
}

fn write_crosstab<W>(out: &mut W, title: &str, table: &CrossTab) -> io::Result<()>
where
    W: Write,
{
    write_title(out, title)?;
    write_header(out, "", table.column_labels.as_slice())?;
    for (label, proportions) in table.row_labels.iter().zip(&table.proportions) {
        write!(out, "  {label:<LABEL_WIDTH$}")?;
        for p in proportions {
            write!(out, " {p:>CELL_WIDTH$.3}")?;
        }
        writeln!(out)?;
    }
    write_excluded(out, table.excluded)
}

fn write_segments<W>(
    out: &mut W,
    title: &str,
    label: &str,
    segments: &SegmentCounts,
) -> io::Result<()>
where
    W: Write,
{
    write_title(out, title)?;
    write_header(out, label, segments.hues.as_slice())?;
    for (segment, counts) in segments.segments.iter().zip(&segments.counts) {
        write!(out, "  {segment:<LABEL_WIDTH$}")?;
        for count in counts {
            write!(out, " {count:>CELL_WIDTH$}")?;
        }
        writeln!(out)?;
    }
    write_excluded(out, segments.excluded)
}

fn write_heatmap<W>(out: &mut W, heatmap: &EngagementHeatmap) -> io::Result<()>
where
    W: Write,
{
    write_title(
        out,
        "Mean engagement (Low=0, Medium=1, High=2) by player level x achievements",
    )?;
    let columns: Vec<String> = heatmap
        .achievement_bins
        .iter()
        .map(ToString::to_string)
        .collect();
    writeln!(out, "  rows: PlayerLevel, columns: AchievementsUnlocked")?;
    write_header(out, "", columns.as_slice())?;
    for (bin, means) in heatmap.level_bins.iter().zip(&heatmap.mean_engagement) {
        write!(out, "  {:<LABEL_WIDTH$}", bin.to_string())?;
        for mean in means {
            write!(out, " {:>CELL_WIDTH$}", fmt_opt(*mean, 2))?;
        }
        writeln!(out)?;
    }
    write_excluded(out, heatmap.excluded)
}

#[cfg(test)]
mod tests {
    use engagement_core::{Dataset, DatasetRow};

    use super::*;

    fn row(engagement: &str, sessions: f64, minutes: f64, level: f64) -> DatasetRow {
        DatasetRow {
            player_id: Some(9000),
            age: Some(30.0),
            gender: Some("Female".to_owned()),
            location: Some("Asia".to_owned()),
            game_genre: Some("Strategy".to_owned()),
            play_time_hours: Some(sessions * 1.5),
            in_game_purchases: Some(1),
            game_difficulty: Some("Medium".to_owned()),
            sessions_per_week: Some(sessions),
            avg_session_duration_minutes: Some(minutes),
            player_level: Some(level),
            achievements_unlocked: Some(level / 2.0),
            engagement_level: Some(engagement.to_owned()),
        }
    }

    #[test]
    fn test_text_report_lists_every_view() {
        let dataset = Dataset::from_rows(vec![
            row("Low", 1.0, 20.0, 10.0),
            row("Medium", 4.0, 80.0, 40.0),
            row("High", 15.0, 170.0, 90.0),
        ]);
        let report = ExplorationReport::build(&dataset);

        let mut buf = Vec::new();
        write_report(&mut buf, &report).unwrap();
        let text = String::from_utf8(buf).unwrap();

        for heading in [
            "Dataset overview",
            "Engagement level distribution",
            "Sessions per week vs play time",
            "by genre",
            "Game difficulty by genre",
            "Player type by engagement level",
            "Session length (minutes)",
            "Mean engagement",
        ] {
            assert!(text.contains(heading), "missing {heading}");
        }
        assert!(text.contains("Hardcore"));
        assert!(text.contains("160-179"));
        assert!(text.contains("Total: 3 players"));
    }

    #[test]
    fn test_overview_std_dev_is_sample() {
        let dataset = Dataset::from_rows(vec![
            row("Low", 1.0, 20.0, 10.0),
            row("High", 12.0, 90.0, 40.0),
        ]);
        let mut buf = Vec::new();
        write_overview(&mut buf, &DatasetOverview::from_dataset(&dataset)).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let line = text
            .lines()
            .find(|l| l.trim_start().starts_with("SessionsPerWeek"))
            .unwrap();
        assert!(line.ends_with("7.78"), "{line}");
    }

    #[test]
    fn test_unlabeled_rows_are_reported() {
        let mut rows = vec![row("Low", 1.0, 20.0, 10.0), row("High", 12.0, 90.0, 40.0)];
        rows[0].engagement_level = None;
        rows[1].game_genre = None;
        let report = ExplorationReport::build(&Dataset::from_rows(rows));

        let mut buf = Vec::new();
        write_distribution(&mut buf, &report.class_distribution).unwrap();
        write_crosstab(&mut buf, "Genre", &report.genre_difficulty).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Total: 1 players"));
        assert_eq!(text.matches("(1 rows excluded from this view)").count(), 2);
    }
}
