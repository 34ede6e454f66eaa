use std::fmt;

use super::formatters::{plural, seconds, short_id, timestamp};
use super::view_models::{
    ConfigInitViewModel, ConfigViewModel, ExportViewModel, RecordViewModel,
    SessionDeleteViewModel, SessionDetailViewModel, SessionListViewModel, TrajectoryViewModel,
};

// --------------------------------------------------------
// Session List View
// --------------------------------------------------------

impl fmt::Display for SessionListViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sessions.is_empty() {
            return writeln!(f, "No sessions found.");
        }

        writeln!(
            f,
            "{:<10} {:<20} {:>9} {:>8}  {}",
            "ID", "CREATED", "MOVEMENTS", "SAMPLES", "STATUS"
        )?;
        for session in &self.sessions {
            let status = if session.ended_at.is_some() {
                "ended"
            } else {
                "open"
            };
            writeln!(
                f,
                "{:<10} {:<20} {:>9} {:>8}  {}",
                short_id(&session.id),
                timestamp(&session.created_at),
                session.movement_count,
                session.sample_count,
                status
            )?;
        }
        Ok(())
    }
}

// --------------------------------------------------------
// Session Detail View
// --------------------------------------------------------

impl fmt::Display for SessionDetailViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Session {}", self.id)?;
        writeln!(f, "  Created:   {}", timestamp(&self.created_at))?;
        match &self.ended_at {
            Some(ended) => writeln!(f, "  Ended:     {}", timestamp(ended))?,
            None => writeln!(f, "  Ended:     (open)")?,
        }
        writeln!(
            f,
            "  Recorded:  {} / {} / {}",
            plural(self.stats.movement_count, "movement"),
            plural(self.stats.sample_count, "sample"),
            seconds(self.stats.recorded_secs)
        )?;

        if self.movements.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(
            f,
            "  {:<3} {:<10} {:<9} {:<5} {:>7} {:>8} {:>8} {:>9}",
            "#", "ID", "TYPE", "HAND", "SAMPLES", "DURATION", "RATE", "PEAK ACC"
        )?;
        for (i, movement) in self.movements.iter().enumerate() {
            let summary = &movement.summary;
            writeln!(
                f,
                "  {:<3} {:<10} {:<9} {:<5} {:>7} {:>8} {:>6.1}Hz {:>9.2}",
                i + 1,
                short_id(&movement.id),
                movement.movement_type,
                movement.hand,
                summary.sample_count,
                seconds(summary.duration_secs),
                summary.mean_rate_hz,
                summary.peak_user_acceleration
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for SessionDeleteViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Deleted session {} ({}, {})",
            self.id,
            plural(self.movement_count, "movement"),
            plural(self.sample_count, "sample")
        )
    }
}

// --------------------------------------------------------
// Record View
// --------------------------------------------------------

impl fmt::Display for RecordViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Session {}", self.session_id)?;
        for (i, movement) in self.movements.iter().enumerate() {
            writeln!(
                f,
                "  {:<3} {:<10} {:<9} {:<5} {}",
                i + 1,
                short_id(&movement.id),
                movement.movement_type,
                movement.hand,
                plural(movement.sample_count, "sample")
            )?;
        }
        for ignored in &self.ignored_commands {
            writeln!(f, "  ignored: {}", ignored)?;
        }
        Ok(())
    }
}

// --------------------------------------------------------
// Movement Views
// --------------------------------------------------------

impl fmt::Display for ExportViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Wrote {} for movement {} to {}",
            plural(self.row_count, "row"),
            short_id(&self.movement_id),
            self.path.display()
        )
    }
}

impl fmt::Display for TrajectoryViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Movement {} ({} {}, {})",
            self.movement_id,
            self.hand,
            self.movement_type,
            plural(self.sample_count, "sample")
        )?;
        if self.positions.is_empty() {
            return writeln!(f, "  (no samples)");
        }
        writeln!(f, "  Max speed: {:.3}", self.max_speed)?;
        writeln!(f)?;
        writeln!(
            f,
            "  {:>5} {:>6} {:>9} {:>9} {:>9} {:>8}  {}",
            "#", "T", "X", "Y", "Z", "SPEED", "COLOR"
        )?;
        for (i, position) in self.positions.iter().enumerate() {
            // Segment i ends at position i; the origin has none.
            let (speed, color) = match i.checked_sub(1) {
                Some(segment) => (
                    format!("{:.3}", self.speeds[segment]),
                    self.colors[segment].as_str(),
                ),
                None => ("-".to_string(), "-"),
            };
            writeln!(
                f,
                "  {:>5} {:>6.3} {:>9.4} {:>9.4} {:>9.4} {:>8}  {}",
                i, self.key_times[i], position.x, position.y, position.z, speed, color
            )?;
        }
        Ok(())
    }
}

// --------------------------------------------------------
// Config Views
// --------------------------------------------------------

impl fmt::Display for ConfigViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let origin = if self.exists { "" } else { " (defaults)" };
        writeln!(f, "# {}{}", self.path.display(), origin)?;
        let body = toml::to_string_pretty(&self.config).map_err(|_| fmt::Error)?;
        write!(f, "{}", body)
    }
}

impl fmt::Display for ConfigInitViewModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.written {
            writeln!(f, "Wrote {}", self.path.display())
        } else {
            writeln!(f, "{} already exists (use --force to overwrite)", self.path.display())
        }
    }
}
