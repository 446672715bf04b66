use crate::modules::aggregator::embed::EmbedTemplate;
use crate::modules::aggregator::models::{
    EpisodeRecord, SeasonGrouping, SeasonReport, SourceAvailability, StreamAvailability,
    StreamReport, UnifiedSearchResult,
};
use crate::modules::aggregator::normalizer::{EpisodeItem, SearchEntry, StreamItem};
use crate::modules::aggregator::title_match::TitleMatcher;
use crate::modules::provider::AnimeSource;
use std::collections::BTreeMap;
use tracing::debug;

/// Merges normalized per-source records into one unified view, keyed by a
/// cross-source identity: title similarity for search, episode number for
/// episodes and seasons.
pub struct Reconciler;

impl Reconciler {
    /// Merge search entries from all sources in combined first-seen order.
    ///
    /// Entries whose titles the matcher considers the same collapse into a
    /// single record; the entry that created the record keeps the canonical
    /// title, and the first-seen item id wins per source.
    pub fn merge_search(
        entries: Vec<SearchEntry>,
        matcher: &dyn TitleMatcher,
    ) -> Vec<UnifiedSearchResult> {
        let mut unified: Vec<UnifiedSearchResult> = Vec::new();

        for entry in entries {
            let existing = unified
                .iter_mut()
                .find(|result| matcher.is_same_title(&result.title, &entry.title));

            match existing {
                Some(result) => {
                    debug!(
                        "'{}' from {} merged into existing result '{}'",
                        entry.title, entry.source, result.title
                    );
                    if !result.per_source.contains_key(&entry.source) {
                        result.sources_available.push(entry.source);
                        result.per_source.insert(entry.source, entry.source_item_id);
                    }
                }
                None => {
                    let mut per_source = BTreeMap::new();
                    per_source.insert(entry.source, entry.source_item_id);
                    unified.push(UnifiedSearchResult {
                        title: entry.title,
                        sources_available: vec![entry.source],
                        per_source,
                    });
                }
            }
        }

        debug!("Search merge produced {} unified results", unified.len());
        unified
    }

    /// Merge per-source episode sequences into number-keyed records.
    ///
    /// First sight of an episode number inserts the record; each source's
    /// slot is source-authoritative (its last write wins). Every record
    /// carries an entry for every configured source, unavailable unless the
    /// source reported that number. Output ascends by episode number.
    pub fn merge_episodes(per_source: Vec<(AnimeSource, Vec<EpisodeItem>)>) -> Vec<EpisodeRecord> {
        let mut by_number: BTreeMap<u32, EpisodeRecord> = BTreeMap::new();

        for (source, items) in per_source {
            for item in items {
                let record = by_number
                    .entry(item.number)
                    .or_insert_with(|| EpisodeRecord::new(item.number));
                record
                    .sources
                    .insert(source, SourceAvailability::available(item.url, item.id));
            }
        }

        by_number.into_values().collect()
    }

    /// Build per-source season groupings. Sources are reported side by
    /// side, not cross-merged: each record attributes availability to its
    /// own source only, with every other configured source unavailable.
    /// Every configured source appears in the report; unqueried or failed
    /// sources contribute an empty grouping.
    pub fn merge_seasons(
        per_source: Vec<(AnimeSource, BTreeMap<String, Vec<EpisodeItem>>)>,
    ) -> SeasonReport {
        let mut report: SeasonReport = AnimeSource::ALL
            .iter()
            .map(|source| (*source, SeasonGrouping::new()))
            .collect();

        for (source, seasons) in per_source {
            let grouping: SeasonGrouping = seasons
                .into_iter()
                .map(|(label, items)| {
                    let records = items
                        .into_iter()
                        .map(|item| {
                            let mut record = EpisodeRecord::new(item.number);
                            record.sources.insert(
                                source,
                                SourceAvailability::available(item.url, item.id),
                            );
                            record
                        })
                        .collect();
                    (label, records)
                })
                .collect();
            report.insert(source, grouping);
        }

        report
    }

    /// Report stream availability per source; there is no merge step. Every
    /// configured source appears, unavailable by default. An available
    /// stream with no pre-built embed markup gets one synthesized through
    /// the template.
    pub fn report_streams(
        per_source: Vec<(AnimeSource, StreamItem)>,
        template: &dyn EmbedTemplate,
    ) -> StreamReport {
        let mut report: StreamReport = AnimeSource::ALL
            .iter()
            .map(|source| (*source, StreamAvailability::unavailable()))
            .collect();

        for (source, item) in per_source {
            let availability = match item.stream_url {
                Some(url) => {
                    let embed = item
                        .embed
                        .unwrap_or_else(|| template.render(source, &url));
                    StreamAvailability {
                        available: true,
                        stream_url: Some(url),
                        embed: Some(embed),
                    }
                }
                None => StreamAvailability::unavailable(),
            };
            report.insert(source, availability);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::aggregator::embed::DefaultEmbedTemplate;
    use crate::modules::aggregator::title_match::NormalizedExactMatcher;

    fn entry(title: &str, source: AnimeSource, id: &str) -> SearchEntry {
        SearchEntry {
            title: title.to_string(),
            source,
            source_item_id: id.to_string(),
            metadata: BTreeMap::new(),
        }
    }

    fn item(number: u32, id: &str) -> EpisodeItem {
        EpisodeItem {
            number,
            id: id.to_string(),
            url: Some(format!("https://x/{}", id)),
        }
    }

    #[test]
    fn same_title_across_sources_collapses_into_one_result() {
        // "Naruto" vs "naruto " (case + trailing space) must merge
        let entries = vec![
            entry("Naruto", AnimeSource::AnimeWorld, "aw-1"),
            entry("naruto ", AnimeSource::AnimeSaturn, "as-1"),
        ];

        let unified = Reconciler::merge_search(entries, &NormalizedExactMatcher);

        assert_eq!(unified.len(), 1);
        assert_eq!(unified[0].title, "Naruto"); // first-seen title is canonical
        assert_eq!(
            unified[0].sources_available,
            vec![AnimeSource::AnimeWorld, AnimeSource::AnimeSaturn]
        );
        assert_eq!(
            unified[0].per_source.get(&AnimeSource::AnimeSaturn).map(String::as_str),
            Some("as-1")
        );
    }

    #[test]
    fn different_titles_never_collapse() {
        let entries = vec![
            entry("Naruto", AnimeSource::AnimeWorld, "aw-1"),
            entry("Bleach", AnimeSource::AnimeSaturn, "as-1"),
        ];

        let unified = Reconciler::merge_search(entries, &NormalizedExactMatcher);
        assert_eq!(unified.len(), 2);
    }

    #[test]
    fn search_output_preserves_first_seen_order() {
        let entries = vec![
            entry("Bleach", AnimeSource::AnimeWorld, "aw-b"),
            entry("Naruto", AnimeSource::AnimeWorld, "aw-n"),
            entry("Naruto", AnimeSource::AnimeSaturn, "as-n"),
        ];

        let unified = Reconciler::merge_search(entries, &NormalizedExactMatcher);
        assert_eq!(unified.len(), 2);
        assert_eq!(unified[0].title, "Bleach");
        assert_eq!(unified[1].title, "Naruto");
    }

    #[test]
    fn duplicate_title_within_one_source_keeps_first_item_id() {
        let entries = vec![
            entry("Naruto", AnimeSource::AnimeWorld, "aw-1"),
            entry("Naruto", AnimeSource::AnimeWorld, "aw-2"),
        ];

        let unified = Reconciler::merge_search(entries, &NormalizedExactMatcher);
        assert_eq!(unified.len(), 1);
        assert_eq!(unified[0].sources_available, vec![AnimeSource::AnimeWorld]);
        assert_eq!(
            unified[0].per_source.get(&AnimeSource::AnimeWorld).map(String::as_str),
            Some("aw-1")
        );
    }

    #[test]
    fn every_unified_result_has_at_least_one_source() {
        let entries = vec![entry("Naruto", AnimeSource::AnimeSaturn, "as-1")];
        let unified = Reconciler::merge_search(entries, &NormalizedExactMatcher);
        assert!(unified.iter().all(|r| !r.sources_available.is_empty()));
    }

    #[test]
    fn episode_merge_matches_cross_source_example() {
        // Source A: episodes 1, 2; Source B: episode 1 only
        let merged = Reconciler::merge_episodes(vec![
            (AnimeSource::AnimeWorld, vec![item(1, "a1"), item(2, "a2")]),
            (AnimeSource::AnimeSaturn, vec![item(1, "b1")]),
        ]);

        assert_eq!(merged.len(), 2);

        let ep1 = &merged[0];
        assert_eq!(ep1.episode_number, 1);
        assert!(ep1.sources[&AnimeSource::AnimeWorld].available);
        assert_eq!(
            ep1.sources[&AnimeSource::AnimeWorld].id.as_deref(),
            Some("a1")
        );
        assert!(ep1.sources[&AnimeSource::AnimeSaturn].available);
        assert_eq!(
            ep1.sources[&AnimeSource::AnimeSaturn].id.as_deref(),
            Some("b1")
        );

        let ep2 = &merged[1];
        assert_eq!(ep2.episode_number, 2);
        assert!(ep2.sources[&AnimeSource::AnimeWorld].available);
        let missing = &ep2.sources[&AnimeSource::AnimeSaturn];
        assert!(!missing.available);
        assert!(missing.id.is_none());
        assert!(missing.url.is_none());
    }

    #[test]
    fn episode_merge_is_sorted_ascending_without_duplicates() {
        let merged = Reconciler::merge_episodes(vec![
            (AnimeSource::AnimeWorld, vec![item(3, "a3"), item(1, "a1")]),
            (AnimeSource::AnimeSaturn, vec![item(2, "b2"), item(1, "b1")]),
        ]);

        let numbers: Vec<u32> = merged.iter().map(|r| r.episode_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_numbers_within_one_source_are_source_authoritative() {
        // Last write from the same source wins for that source's slot
        let merged = Reconciler::merge_episodes(vec![(
            AnimeSource::AnimeWorld,
            vec![item(1, "first"), item(1, "second")],
        )]);

        assert_eq!(merged.len(), 1);
        assert_eq!(
            merged[0].sources[&AnimeSource::AnimeWorld].id.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn every_record_covers_every_configured_source() {
        let merged = Reconciler::merge_episodes(vec![(
            AnimeSource::AnimeSaturn,
            vec![item(1, "b1")],
        )]);

        for record in &merged {
            for source in AnimeSource::ALL {
                assert!(record.sources.contains_key(&source));
            }
        }
    }

    #[test]
    fn episode_merge_is_deterministic() {
        let input = || {
            vec![
                (AnimeSource::AnimeWorld, vec![item(2, "a2"), item(1, "a1")]),
                (AnimeSource::AnimeSaturn, vec![item(1, "b1")]),
            ]
        };
        assert_eq!(
            Reconciler::merge_episodes(input()),
            Reconciler::merge_episodes(input())
        );
    }

    #[test]
    fn seasons_are_reported_side_by_side_not_cross_merged() {
        let mut aw_seasons = BTreeMap::new();
        aw_seasons.insert("S1".to_string(), vec![item(1, "a1")]);
        let mut as_seasons = BTreeMap::new();
        as_seasons.insert("S1".to_string(), vec![item(1, "b1")]);

        let report = Reconciler::merge_seasons(vec![
            (AnimeSource::AnimeWorld, aw_seasons),
            (AnimeSource::AnimeSaturn, as_seasons),
        ]);

        // Same episode number in both sources stays in two separate groupings
        let aw_record = &report[&AnimeSource::AnimeWorld]["S1"][0];
        assert!(aw_record.sources[&AnimeSource::AnimeWorld].available);
        assert!(!aw_record.sources[&AnimeSource::AnimeSaturn].available);

        let as_record = &report[&AnimeSource::AnimeSaturn]["S1"][0];
        assert!(!as_record.sources[&AnimeSource::AnimeWorld].available);
        assert!(as_record.sources[&AnimeSource::AnimeSaturn].available);
    }

    #[test]
    fn season_report_covers_every_configured_source() {
        let mut as_seasons = BTreeMap::new();
        as_seasons.insert("S1".to_string(), vec![item(1, "b1")]);

        let report =
            Reconciler::merge_seasons(vec![(AnimeSource::AnimeSaturn, as_seasons)]);

        assert_eq!(report.len(), AnimeSource::ALL.len());
        assert!(report[&AnimeSource::AnimeWorld].is_empty());
        assert_eq!(report[&AnimeSource::AnimeSaturn]["S1"].len(), 1);
    }

    #[test]
    fn stream_report_defaults_every_source_to_unavailable() {
        let template = DefaultEmbedTemplate::new("https://proxy.example/proxy");
        let report = Reconciler::report_streams(Vec::new(), &template);

        assert_eq!(report.len(), AnimeSource::ALL.len());
        assert!(report.values().all(|s| !s.available));
    }

    #[test]
    fn stream_without_prebuilt_embed_gets_one_synthesized() {
        let template = DefaultEmbedTemplate::new("https://proxy.example/proxy");
        let report = Reconciler::report_streams(
            vec![(
                AnimeSource::AnimeWorld,
                StreamItem {
                    stream_url: Some("https://aw/stream/1".to_string()),
                    embed: None,
                },
            )],
            &template,
        );

        let aw = &report[&AnimeSource::AnimeWorld];
        assert!(aw.available);
        assert!(aw.embed.as_deref().unwrap().contains("<iframe"));
    }

    #[test]
    fn prebuilt_embed_markup_is_kept() {
        let template = DefaultEmbedTemplate::new("https://proxy.example/proxy");
        let report = Reconciler::report_streams(
            vec![(
                AnimeSource::AnimeSaturn,
                StreamItem {
                    stream_url: Some("https://as/p.m3u8".to_string()),
                    embed: Some("<div id=\"player\"></div>".to_string()),
                },
            )],
            &template,
        );

        assert_eq!(
            report[&AnimeSource::AnimeSaturn].embed.as_deref(),
            Some("<div id=\"player\"></div>")
        );
    }

    #[test]
    fn failed_stream_lookup_stays_unavailable() {
        let template = DefaultEmbedTemplate::new("https://proxy.example/proxy");
        let report = Reconciler::report_streams(
            vec![(AnimeSource::AnimeSaturn, StreamItem::default())],
            &template,
        );

        let saturn = &report[&AnimeSource::AnimeSaturn];
        assert!(!saturn.available);
        assert!(saturn.stream_url.is_none());
        assert!(saturn.embed.is_none());
    }
}
