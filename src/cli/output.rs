//! Output formatting for the CLI.

use crate::core::worker::format_date;
use crate::core::{Worker, WorkerSummary};

/// Printed by `display` when there are no workers.
pub const EMPTY_LIST: &str = "Список работников пуст.";

/// Printed by `select` when no worker has the phone.
pub const NOT_FOUND: &str = "Работник с таким номером телефона не найден.";

fn separator() -> String {
    format!(
        "+-{}-+-{}-+-{}-+-{}-+-{}-+",
        "-".repeat(4),
        "-".repeat(30),
        "-".repeat(20),
        "-".repeat(15),
        "-".repeat(15)
    )
}

/// Render the worker listing as a fixed-width table.
pub fn format_list(workers: &[WorkerSummary]) -> String {
    if workers.is_empty() {
        return format!("{EMPTY_LIST}\n");
    }

    let line = separator();
    let mut out = String::new();
    out.push_str(&line);
    out.push('\n');
    out.push_str(&format!(
        "| {:^4} | {:^30} | {:^20} | {:^15} | {:^15} |\n",
        "№", "Фамилия", "Имя", "Номер телефона", "Дата рождения"
    ));
    out.push_str(&line);
    out.push('\n');

    for (idx, worker) in workers.iter().enumerate() {
        out.push_str(&format!(
            "| {:>4} | {:<30} | {:<20} | {:>15} | {:>15} |\n",
            idx + 1,
            worker.surname,
            worker.name,
            worker.phone,
            format_date(worker.date)
        ));
    }

    out.push_str(&line);
    out.push('\n');
    out
}

/// Render one worker, or the not-found message.
pub fn format_worker(worker: Option<&Worker>) -> String {
    match worker {
        Some(w) => format!(
            "Фамилия: {}\nИмя: {}\nНомер телефона: {}\nДата рождения: {}\n",
            w.surname,
            w.name,
            w.phone,
            format_date(w.date)
        ),
        None => format!("{NOT_FOUND}\n"),
    }
}
