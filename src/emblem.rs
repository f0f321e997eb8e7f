/// Shown for any team missing from the table.
pub const PLACEHOLDER_EMBLEM: &str = "https://via.placeholder.com/330x220?text=Flag";

const FLAGS: &[(&str, &str)] = &[
    ("Algeria", "https://flagcdn.com/w320/dz.png"),
    ("Morocco", "https://flagcdn.com/w320/ma.png"),
    ("Tunisia", "https://flagcdn.com/w320/tn.png"),
    ("Egypt", "https://flagcdn.com/w320/eg.png"),
    ("Libya", "https://flagcdn.com/w320/ly.png"),
    ("Sudan", "https://flagcdn.com/w320/sd.png"),
    ("Nigeria", "https://flagcdn.com/w320/ng.png"),
    ("Ghana", "https://flagcdn.com/w320/gh.png"),
    ("Senegal", "https://flagcdn.com/w320/sn.png"),
    ("Cameroon", "https://flagcdn.com/w320/cm.png"),
    ("Ivory Coast", "https://flagcdn.com/w320/ci.png"),
    ("Côte d'Ivoire", "https://flagcdn.com/w320/ci.png"),
    ("Mali", "https://flagcdn.com/w320/ml.png"),
    ("Burkina Faso", "https://flagcdn.com/w320/bf.png"),
    ("Liberia", "https://flagcdn.com/w320/lr.png"),
    ("Togo", "https://flagcdn.com/w320/tg.png"),
    ("Equatorial Guinea", "https://flagcdn.com/w320/gq.png"),
    ("Rwanda", "https://flagcdn.com/w320/rw.png"),
    ("Mozambique", "https://flagcdn.com/w320/mz.png"),
    ("South Africa", "https://flagcdn.com/w320/za.png"),
    ("Uganda", "https://flagcdn.com/w320/ug.png"),
    ("Zimbabwe", "https://flagcdn.com/w320/zw.png"),
    ("Botswana", "https://flagcdn.com/w320/bw.png"),
];

/// Resolve a team name to its flag image. Never fails.
pub fn emblem_for(team: &str) -> &'static str {
    let team = team.trim();
    FLAGS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(team))
        .map(|(_, url)| *url)
        .unwrap_or(PLACEHOLDER_EMBLEM)
}

/// Prefer a provider-supplied badge, falling back to the table.
pub fn emblem_or_badge(team: &str, badge: Option<&str>) -> String {
    match badge.map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => emblem_for(team).to_string(),
    }
}
