use crate::model::StaffRequest;
use crate::parser::NOTE_SEPARATOR;
use crate::scheduler::{Conflict, ConflictKind, Generated};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Roster texte : un nom par ligne, ou séparés par `,` / `、`.
pub fn import_staff<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(raw
        .split(['\n', ',', '、'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}

/// Import de souhaits depuis CSV: header `staff,request_text[,note]`
pub fn import_requests_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StaffRequest>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let staff = rec.get(0).context("missing staff")?.trim();
        let text = rec.get(1).context("missing request_text")?.trim();
        if staff.is_empty() {
            bail!("invalid request row (empty staff)");
        }
        let mut text = text.to_string();
        if let Some(note) = rec.get(2).map(str::trim).filter(|n| !n.is_empty()) {
            text = format!("{text} {NOTE_SEPARATOR} {note}");
        }
        out.push(StaffRequest::new(staff, text));
    }
    Ok(out)
}

/// Lignes non vides d'un fichier de règles individuelles.
pub fn read_rule_lines<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(raw
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

/// Écriture atomique (fichier temporaire puis renommage).
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> anyhow::Result<()> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}

/// Export JSON du résultat (jolie mise en forme)
pub fn export_generated_json<P: AsRef<Path>>(path: P, generated: &Generated) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(generated)?;
    write_atomic(path, s.as_bytes())
}

/// Export CSV des conflits: header `day,shift,staff,kind`
pub fn export_conflicts_csv<P: AsRef<Path>>(path: P, conflicts: &[Conflict]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["day", "shift", "staff", "kind"])?;
    for c in conflicts {
        let kind = match &c.kind {
            ConflictKind::DoubleAssignment => "double".to_string(),
            ConflictKind::UnknownStaff => "unknown".to_string(),
            ConflictKind::Violation(reason) => reason.to_string(),
        };
        w.write_record([
            c.day.to_string().as_str(),
            c.shift.label(),
            c.staff.as_str(),
            kind.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShiftKind;
    use crate::scheduler::Ineligible;
    use tempfile::tempdir;

    #[test]
    fn requests_csv_with_optional_note() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("requests.csv");
        fs::write(
            &path,
            "staff,request_text,note\nA,\"5日休み、6日早番\",\nB,7日夜勤,夕方まで会議\n",
        )
        .unwrap();
        let reqs = import_requests_csv(&path).unwrap();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].text, "5日休み、6日早番");
        assert_eq!(reqs[1].text, "7日夜勤 / 備考: 夕方まで会議");
    }

    #[test]
    fn staff_file_accepts_lines_and_commas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("staff.txt");
        fs::write(&path, "佐藤、鈴木\n田中\n\n").unwrap();
        assert_eq!(import_staff(&path).unwrap(), vec!["佐藤", "鈴木", "田中"]);
    }

    #[test]
    fn conflicts_report_is_written() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let conflicts = [Conflict {
            staff: "A".into(),
            day: 3,
            shift: ShiftKind::Early,
            kind: ConflictKind::Violation(Ineligible::RestAfterNight),
        }];
        export_conflicts_csv(&path, &conflicts).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "day,shift,staff,kind\n3,早番,A,rest after night shift\n");
    }
}
