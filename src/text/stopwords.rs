// Stop-word sets for Korean and English patent/paper text.
//
// The Korean set covers grammatical particles, counters and generic nouns.
// The English set covers function words plus research and patent boilerplate
// ("comprising", "wherein", "patient", "study") that would otherwise dominate
// every ranking. Both sets are fixed process-wide data, built once on first
// use and shared by reference.

use std::collections::HashSet;
use std::sync::LazyLock;

const KOREAN: &[&str] = &[
    "이", "그", "저", "것", "들", "는", "은", "을", "를", "에", "의", "가", "과", "와", "도", "만",
    "이다", "있다", "되다", "하다", "같다", "보다", "더", "매우", "정말", "아주", "조금", "좀",
    "때문", "위해", "통해", "대해", "관해", "따라", "위한", "통한", "대한", "관한", "따른",
    "등", "및", "또는", "그리고", "하지만", "그러나", "따라서", "그러므로", "즉", "예를",
    "수", "개", "명", "건", "점", "번", "차", "회", "년", "월", "일", "시", "분", "초",
    "모든", "각", "어떤", "여러", "다른", "새로운", "주요", "중요", "특별", "일반",
    "방법", "시스템", "장치", "기술", "연구", "분석", "결과", "효과", "성능", "특성",
    "포함하는", "치환된",
];

const ENGLISH: &[&str] = &[
    // Articles, prepositions, auxiliaries
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "up", "about", "into", "through", "during", "before", "after", "above", "below",
    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do", "does", "did",
    "will", "would", "could", "should", "may", "might", "must", "can", "shall",
    // Patent boilerplate
    "method", "system", "apparatus", "device", "present", "invention", "embodiment", "according",
    "comprising", "including", "wherein", "therefor", "thereof", "herein", "said", "such",
    "provided", "configured", "adapted", "disposed", "formed", "made", "using", "based",
    // Pronouns and determiners
    "this", "that", "these", "those", "which", "who", "whom", "whose",
    "it", "its", "they", "their", "them", "he", "his", "she", "her", "we", "our", "us",
    "i", "me", "my", "you", "your", "yours", "him",
    "there", "here", "where", "when", "why", "how", "one", "two", "three", "four", "five",
    "first", "second", "third", "next", "last", "many", "sub", "within",
    // Biomedical research vocabulary
    "cell", "cells", "human", "humans", "patient", "patients", "study", "studies",
    "analysis", "results", "data", "showed", "significant", "observed", "found",
    "increased", "decreased", "compared", "control", "treatment", "group", "groups",
    "effect", "effects", "level", "levels", "expression", "protein", "proteins",
    "gene", "genes", "response", "activity", "function", "role", "important",
    "potential", "possible", "previous", "recent", "current", "novel", "new",
    "research", "investigation", "examination", "evaluation", "assessment",
    "measured", "determined", "identified", "demonstrated", "revealed",
    "associated", "related", "induced", "caused", "performed", "conducted",
    // Terms frequent enough across both corpora to drown out signal
    "more", "sequence", "alkylene", "medium", "tissue",
    "methods", "culture", "organoids", "stem", "bone", "organoid", "marrow", "least",
    "mammalian", "any", "acid", "comprises", "culturing", "compositions", "crispr", "target",
    "composition", "producing", "disease", "intestinal", "inhibitor", "tracr", "systems",
    "selected", "region", "liver", "cancer", "use", "enzyme", "matrix", "embryoid", "free",
    "model", "neural", "vascular", "step", "substituted", "tumor", "compounds",
    "ring", "tissues", "rna", "drug", "each", "provides", "organ", "kinase", "sequences",
    "nucleic", "subject", "independently", "delivery", "form", "polynucleotide", "vegf",
    "hours", "derived", "vitro", "also", "bodies", "mature", "complex", "having",
    "combination", "pluripotent", "containing", "cycloalkyl", "produced", "serum", "lipid",
    "nano", "optionally", "surface", "population", "chamber", "scf", "mate", "alkyl",
    "thereby", "agent", "dimensional", "extracellular", "spheroids", "network", "described",
    "growth", "well", "administering", "claim", "application", "example", "further",
    "various", "particular", "specific", "multiple", "several", "different", "certain",
    "preferred", "suitable", "effective", "useful", "known", "shown",
];

static STANDARD: LazyLock<StopwordFilter> =
    LazyLock::new(|| StopwordFilter::new(KOREAN.iter().copied(), ENGLISH.iter().copied()));

/// Decides whether a normalized token survives stop-word exclusion.
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    korean: HashSet<&'static str>,
    english: HashSet<&'static str>,
}

impl StopwordFilter {
    /// Build a filter from explicit word lists.
    pub fn new(
        korean: impl IntoIterator<Item = &'static str>,
        english: impl IntoIterator<Item = &'static str>,
    ) -> Self {
        Self {
            korean: korean.into_iter().collect(),
            english: english.into_iter().collect(),
        }
    }

    /// The shared Korean + English filter used by the default tokenizer.
    pub fn standard() -> &'static StopwordFilter {
        &STANDARD
    }

    /// True iff the token is in neither stop-word set.
    pub fn accepts(&self, token: &str) -> bool {
        !self.korean.contains(token) && !self.english.contains(token)
    }

    pub fn korean_len(&self) -> usize {
        self.korean.len()
    }

    pub fn english_len(&self) -> usize {
        self.english.len()
    }
}
