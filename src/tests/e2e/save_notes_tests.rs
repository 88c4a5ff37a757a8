use crate::modules::quotations::adapters::outbound::warehouse_in_memory::InMemoryWarehouse;
use crate::modules::quotations::core::filter::QuotationFilter;
use crate::modules::quotations::core::snapshot::NoteEntry;
use crate::modules::quotations::use_cases::save_notes::command::SaveNotes;
use crate::modules::quotations::use_cases::save_notes::handler::SaveOutcome;
use crate::tests::fixtures::quotations::{QuotationRecordBuilder, date};
use crate::tests::fixtures::state::make_test_state;

fn warehouse() -> InMemoryWarehouse {
    InMemoryWarehouse::with_quotations(vec![
        QuotationRecordBuilder::new()
            .project_name("Irodaház hűtési rendszer felújítás")
            .requester("Alfa Zrt.")
            .quote_date(date(2024, 3, 14))
            .build(),
        QuotationRecordBuilder::new()
            .project_name("Raktár világítás")
            .requester("Béta Kft.")
            .quote_date(date(2023, 11, 2))
            .build(),
        // Same first five words and requester as the next row.
        QuotationRecordBuilder::new()
            .project_name("Csarnok tető szigetelés első ütem")
            .requester("Gamma Bt.")
            .quote_date(date(2022, 6, 1))
            .build(),
        QuotationRecordBuilder::new()
            .project_name("Csarnok tető szigetelés első ütem pótmunka")
            .requester("Gamma Bt.")
            .quote_date(date(2022, 7, 1))
            .build(),
    ])
}

#[tokio::test]
async fn edits_notes_and_reads_them_back_on_reload() {
    let (state, _) = make_test_state(warehouse());

    let rows = state
        .list_quotations
        .search(&QuotationFilter::default())
        .await
        .unwrap()
        .rows;
    let original: Vec<NoteEntry> = rows
        .iter()
        .map(|row| NoteEntry::new(&row.unique_key, row.note.as_deref()))
        .collect();
    let edited: Vec<NoteEntry> = original
        .iter()
        .map(|entry| match entry.unique_key.as_str() {
            "Raktár világítás Béta Kft." => NoteEntry::new(&entry.unique_key, Some("Visszahívni")),
            "Csarnok tető szigetelés első ütem Gamma Bt." => {
                NoteEntry::new(&entry.unique_key, Some("Közös megjegyzés"))
            }
            _ => entry.clone(),
        })
        .collect();

    let outcome = state
        .save_notes
        .handle(SaveNotes { original, edited })
        .await
        .unwrap();

    // The colliding rows collapse into one snapshot entry.
    assert_eq!(outcome, SaveOutcome::Saved { updated: 2 });

    let reloaded = state
        .list_quotations
        .search(&QuotationFilter::default())
        .await
        .unwrap()
        .rows;
    let notes: Vec<(&str, Option<&str>)> = reloaded
        .iter()
        .map(|row| (row.unique_key.as_str(), row.note.as_deref()))
        .collect();

    assert_eq!(
        notes,
        vec![
            ("Irodaház hűtési rendszer felújítás Alfa Zrt.", None),
            ("Raktár világítás Béta Kft.", Some("Visszahívni")),
            (
                "Csarnok tető szigetelés első ütem Gamma Bt.",
                Some("Közös megjegyzés")
            ),
            (
                "Csarnok tető szigetelés első ütem Gamma Bt.",
                Some("Közös megjegyzés")
            ),
        ]
    );
}

#[tokio::test]
async fn saving_the_rendered_notes_unchanged_persists_nothing() {
    let (state, warehouse) = make_test_state(warehouse());

    let rows = state.list_quotations.load().await.unwrap();
    let entries: Vec<NoteEntry> = rows
        .iter()
        .map(|row| NoteEntry::new(&row.unique_key, row.note.as_deref()))
        .collect();

    let outcome = state
        .save_notes
        .handle(SaveNotes {
            original: entries.clone(),
            edited: entries,
        })
        .await
        .unwrap();

    assert_eq!(outcome, SaveOutcome::NothingToSave);
    assert_eq!(warehouse.note("Raktár világítás Béta Kft.").await, None);
}

#[tokio::test]
async fn clearing_a_note_stores_null() {
    let (state, warehouse) = make_test_state(warehouse());
    let key = "Raktár világítás Béta Kft.";

    state
        .save_notes
        .handle(SaveNotes {
            original: vec![NoteEntry::new(key, None)],
            edited: vec![NoteEntry::new(key, Some("Ajánlat elküldve"))],
        })
        .await
        .unwrap();
    let outcome = state
        .save_notes
        .handle(SaveNotes {
            original: vec![NoteEntry::new(key, Some("Ajánlat elküldve"))],
            edited: vec![NoteEntry::new(key, Some(""))],
        })
        .await
        .unwrap();

    assert_eq!(outcome, SaveOutcome::Saved { updated: 1 });
    assert_eq!(warehouse.note(key).await, Some(None));
}
