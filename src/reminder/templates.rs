use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::client::Email;
use crate::domain::{Exam, MilestoneKind};

const SIGNATURE: &str = "Salam hangat,\nTim EduCalm Space\neducalm.space";

const WEEKDAYS: [&str; 7] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"];
const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Render the reminder for a milestone. The tone is chosen by `kind` alone;
/// `days_until` only fills in the countdown.
pub fn reminder_email(kind: MilestoneKind, exam: &Exam, days_until: i64) -> Email {
    let days = days_until.max(0);
    let subject = exam.subject.as_ref();
    let time = clock_time(exam.exam_at);
    let date = long_date(exam.exam_at.date());

    let (title, paragraphs) = match kind {
        MilestoneKind::OnTheDay => (
            format!("Hari Ini Ujian {}!", subject),
            vec![
                format!("Hari ini adalah hari ujian {} pada pukul {}!", subject, time),
                [
                    "Tips untuk menghadapi ujian hari ini:",
                    "- Sarapan yang cukup untuk energi",
                    "- Tarik napas dalam-dalam untuk menenangkan diri",
                    "- Yakin pada kemampuanmu sendiri",
                    "- Datang 15 menit lebih awal untuk persiapan",
                ]
                .join("\n"),
                "Ingat: kamu sudah belajar dengan baik. Kamu BISA melakukannya!".to_string(),
                "Percaya diri dan tetap tenang. Semoga berhasil!".to_string(),
            ],
        ),
        MilestoneKind::OneDayBefore => (
            format!("Besok Ujian {} - Waktunya Istirahat", subject),
            vec![
                format!(
                    "Besok kamu akan menghadapi ujian {} pada pukul {}.",
                    subject, time
                ),
                [
                    "Saran untuk hari ini:",
                    "- Latihan napas 5 menit untuk menenangkan pikiran",
                    "- Review materi secara RINGAN, jangan terlalu berat",
                    "- Tidur yang cukup, minimal 7-8 jam",
                    "- Hindari belajar hingga larut malam",
                ]
                .join("\n"),
                "Kunjungi Zona Tenang di EduCalm Space untuk latihan pernapasan dan meditasi gratis."
                    .to_string(),
                "Kamu sudah siap. Istirahat yang cukup adalah kuncinya!".to_string(),
            ],
        ),
        MilestoneKind::ThreeDaysBefore => (
            format!("{} Hari Lagi Ujian {} - Tetap Tenang", days, subject),
            vec![
                format!(
                    "{} hari lagi ujian {} pada {} pukul {}.",
                    days, subject, date, time
                ),
                [
                    "Saran untuk kamu:",
                    "- Latihan relaksasi setiap hari selama 10-15 menit",
                    "- Buat jadwal review materi yang konsisten",
                    "- Istirahat yang cukup di antara sesi belajar",
                    "- Makan makanan bergizi untuk stamina",
                ]
                .join("\n"),
                "Pikiran yang tenang membuat belajar lebih efektif. Kamu pasti bisa!".to_string(),
            ],
        ),
        MilestoneKind::SevenDaysBefore => (
            format!("{} Hari Lagi Ujian {} - Mulai Persiapan", days, subject),
            vec![
                format!(
                    "{} hari lagi ujian {} pada {} pukul {}.",
                    days, subject, date, time
                ),
                [
                    "Saran untuk kamu:",
                    "- Mulai review materi secara perlahan dan konsisten",
                    "- Buat catatan atau mind map untuk memudahkan belajar",
                    "- Istirahat 10 menit setiap 1 jam belajar",
                    "- Masih banyak waktu, tetap tenang dan percaya diri",
                ]
                .join("\n"),
                "Yuk, mulai belajar dengan santai dan konsisten. Semangat!".to_string(),
            ],
        ),
    };

    build_email(exam, title, paragraphs)
}

/// Render the acknowledgement sent once an exam is registered
pub fn confirmation_email(exam: &Exam) -> Email {
    let subject = exam.subject.as_ref();

    let title = format!("Ujian {} Telah Didaftarkan", subject);
    let paragraphs = vec![
        format!(
            "Ujian {} telah berhasil didaftarkan pada EduCalm Space. Berikut detailnya:",
            subject
        ),
        format!(
            "Mata Pelajaran: {}\nTanggal: {}\nWaktu: {}\nEmail: {}",
            subject,
            long_date(exam.exam_at.date()),
            clock_time(exam.exam_at),
            exam.recipient
        ),
        [
            "Kamu akan menerima pengingat otomatis:",
            "- 7 hari sebelum ujian: tips mulai review materi",
            "- 3 hari sebelum ujian: tips latihan relaksasi",
            "- 1 hari sebelum ujian: tips latihan napas dan istirahat",
            "- Hari ujian: motivasi dan semangat",
        ]
        .join("\n"),
        "Semoga berhasil dan tetap tenang!".to_string(),
    ];

    build_email(exam, title, paragraphs)
}

/// Indonesian long date, e.g. `Senin, 20 Oktober 2026`
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        WEEKDAYS[date.weekday().num_days_from_monday() as usize],
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

fn clock_time(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn build_email(exam: &Exam, subject: String, mut paragraphs: Vec<String>) -> Email {
    paragraphs.insert(0, "Halo!".to_string());
    paragraphs.push(SIGNATURE.to_string());

    let text_body = paragraphs.join("\n\n");
    let html_body = paragraphs
        .iter()
        .map(|p| format!("<p>{}</p>", escape_html(p).replace('\n', "<br>")))
        .collect::<String>();

    Email {
        recipient: exam.recipient.clone(),
        subject,
        html_body,
        text_body,
    }
}
