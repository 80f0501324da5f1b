/*!
 * Tests for the summarizer and token budgets
 */

use anyhow::Result;
use std::sync::Arc;
use summarist::errors::SummarizationError;
use summarist::providers::mock::MockSummaryModel;
use summarist::summarization::{
    LoadedModel, Summarizer, TokenBudget, MAX_INPUT_TOKENS, MAX_SUMMARY_TOKENS,
};
use crate::common;

/// Test that blank input never reaches the model
#[tokio::test]
async fn test_summarize_withBlankInput_shouldNotInvokeModel() {
    let model = MockSummaryModel::working();
    let summarizer = common::summarizer_with(Arc::new(model.clone()));

    let result = summarizer.summarize(" \n\t ").await;

    assert!(matches!(result, Err(SummarizationError::EmptyInput)));
    assert_eq!(model.request_count(), 0);
}

/// Test that long input is truncated to the input budget, keeping the prefix
#[tokio::test]
async fn test_summarize_withOverlongInput_shouldTruncatePrefix() -> Result<()> {
    let model = MockSummaryModel::working();
    let summarizer = common::summarizer_with(Arc::new(model.clone()));
    let text = common::numbered_words(2000);

    let summary = summarizer.summarize(&text).await?;

    let inputs = model.inputs();
    assert_eq!(inputs.len(), 1);
    assert_eq!(inputs[0].split_whitespace().count(), MAX_INPUT_TOKENS);
    assert!(text.starts_with(&inputs[0]));
    assert!(inputs[0].ends_with("w1023"));
    assert!(!summary.is_empty());
    Ok(())
}

/// Test that an overlong model output is cleaned and clipped
#[tokio::test]
async fn test_summarize_withVerboseModel_shouldClipToSummaryBudget() -> Result<()> {
    let summarizer = common::summarizer_with(Arc::new(MockSummaryModel::verbose()));

    let summary = summarizer.summarize("Some article text.").await?;

    assert!(!summary.contains("<s>"));
    assert!(!summary.contains("<pad>"));
    assert_eq!(summary.split_whitespace().count(), MAX_SUMMARY_TOKENS);
    assert!(summary.starts_with("word0 word1"));
    Ok(())
}

/// Test that backend failures surface as provider errors
#[tokio::test]
async fn test_summarize_withFailingModel_shouldReturnProviderError() {
    let summarizer = common::summarizer_with(Arc::new(MockSummaryModel::failing()));

    let result = summarizer.summarize("Some text").await;

    assert!(matches!(result, Err(SummarizationError::Provider(_))));
}

/// Test that a pretrained tokenizer drives the input budget
#[tokio::test]
async fn test_summarize_withPretrainedTokenizer_shouldCountPunctuation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let tokenizer_path = common::write_word_level_tokenizer(temp_dir.path())?;
    let tokens = TokenBudget::load(Some(tokenizer_path.as_path()))?;

    // Every word is followed by a comma token, so 600 words are 1200 tokens
    let text = (0..600).map(|i| format!("w{},", i)).collect::<Vec<_>>().join(" ");
    assert_eq!(tokens.count(&text)?, 1200);

    let model = MockSummaryModel::working();
    let summarizer = Summarizer::with_model(Arc::new(LoadedModel::from_parts(tokens, Arc::new(model.clone()))));
    summarizer.summarize(&text).await?;

    let input = &model.inputs()[0];
    assert_eq!(input.split_whitespace().count(), 512);
    assert!(input.ends_with("w511,"));
    Ok(())
}

/// Test that a missing tokenizer file is a tokenizer error
#[test]
fn test_token_budget_load_withMissingFile_shouldFail() {
    let result = TokenBudget::load(Some(std::path::Path::new("missing/tokenizer.json")));
    assert!(matches!(result, Err(SummarizationError::Tokenizer(_))));
}

/// Test that multibyte text is cut on a character boundary
#[test]
fn test_token_budget_truncate_withMultibyteText_shouldKeepValidUtf8() -> Result<()> {
    let tokens = TokenBudget::Whitespace;
    let (kept, dropped) = tokens.truncate("日本語 の テキスト です", 2)?;

    assert_eq!(kept, "日本語 の");
    assert_eq!(dropped, 2);
    Ok(())
}
