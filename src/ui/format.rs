//! Pure text projections of snapshot data. Everything the display prints
//! is built here so it can be asserted on without a terminal.

use crate::core::domain::model::{GuestSummary, HostGauges};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// `CPU (8 cores, 16 threads)`, with `?` for unknown topology.
pub fn cpu_title(gauges: &HostGauges) -> String {
    let cores = gauges
        .cores
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".to_string());
    let threads = gauges
        .threads
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".to_string());
    format!("CPU ({} cores, {} threads)", cores, threads)
}

/// `RAM (8.0/16.0 GiB)`.
pub fn ram_title(gauges: &HostGauges) -> String {
    format!(
        "RAM ({})",
        used_total_gib(gauges.memory_used, gauges.memory_total)
    )
}

/// `Disk (1024.0/2048.0 GiB)`.
pub fn disk_title(gauges: &HostGauges) -> String {
    format!(
        "Disk ({})",
        used_total_gib(gauges.disk_used, gauges.disk_total)
    )
}

/// I/O wait with one decimal place, e.g. `1.2%`.
pub fn io_wait_text(gauges: &HostGauges) -> String {
    format!("{:.1}%", gauges.io_wait_fraction * 100.0)
}

/// `8.0/16.0 GiB`.
pub fn used_total_gib(used: u64, total: u64) -> String {
    format!("{:.1}/{:.1} GiB", used as f64 / GIB, total as f64 / GIB)
}

/// One guest list row: `ID: 101 | web | running`.
pub fn guest_row(guest: &GuestSummary) -> String {
    format!("ID: {} | {} | {}", guest.id, guest.name, guest.status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::model::GuestStatus;

    fn sample_gauges() -> HostGauges {
        HostGauges {
            cpu_fraction: 0.37,
            cores: Some(8),
            threads: Some(16),
            memory_used: 8589934592,
            memory_total: 17179869184,
            disk_used: 1099511627776,
            disk_total: 2199023255552,
            io_wait_fraction: 0.012,
        }
    }

    #[test]
    fn test_cpu_title() {
        assert_eq!(cpu_title(&sample_gauges()), "CPU (8 cores, 16 threads)");

        let mut unknown = sample_gauges();
        unknown.cores = None;
        unknown.threads = None;
        assert_eq!(cpu_title(&unknown), "CPU (? cores, ? threads)");
    }

    #[test]
    fn test_ram_and_disk_titles() {
        assert_eq!(ram_title(&sample_gauges()), "RAM (8.0/16.0 GiB)");
        assert_eq!(disk_title(&sample_gauges()), "Disk (1024.0/2048.0 GiB)");
    }

    #[test]
    fn test_io_wait_one_decimal() {
        assert_eq!(io_wait_text(&sample_gauges()), "1.2%");

        let mut idle = sample_gauges();
        idle.io_wait_fraction = 0.0;
        assert_eq!(io_wait_text(&idle), "0.0%");
    }

    #[test]
    fn test_guest_row_pattern() {
        let guest = GuestSummary {
            id: 101,
            name: "web".to_string(),
            status: GuestStatus::Running,
        };
        assert_eq!(guest_row(&guest), "ID: 101 | web | running");
    }
}
