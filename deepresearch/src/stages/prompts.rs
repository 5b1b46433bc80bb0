//! Prompt catalogue for the pipeline stages.

use crate::providers::PromptTemplate;

/// Generates `{num_queries}` search queries for `{research_topic}`.
pub const QUERY_GENERATION: PromptTemplate = PromptTemplate::new(
    "query_generation",
    "You are a research assistant tasked with generating effective search queries.\n\
     Based on the research topic provided, generate {num_queries} specific search queries\n\
     that will help gather comprehensive information on the topic.\n\
     \n\
     Research topic: {research_topic}\n\
     \n\
     Output {num_queries} search queries, one per line, that are specific, clear, and focused\n\
     on different aspects of the research topic.",
);

/// Synthesizes `{search_results}` into a structured summary.
pub const SYNTHESIS: PromptTemplate = PromptTemplate::new(
    "synthesis",
    "You are a research assistant tasked with synthesizing information from multiple sources.\n\
     \n\
     Research topic: {research_topic}\n\
     \n\
     Below are the search results from multiple queries:\n\
     \n\
     {search_results}\n\
     \n\
     Based on these results, provide a comprehensive synthesis of the information.\n\
     Focus on extracting key facts, concepts, and insights relevant to the research topic.\n\
     Organize the information in a structured way that highlights the most important points.\n\
     Cite sources where appropriate using [Source: URL] notation.\n\
     \n\
     Your synthesis should be thorough, accurate, and well-organized.",
);

/// Drafts an answer from `{research_synthesis}`.
pub const DRAFTING: PromptTemplate = PromptTemplate::new(
    "drafting",
    "You are a professional content writer tasked with creating a comprehensive,\n\
     well-structured answer based on research findings.\n\
     \n\
     Research topic: {research_topic}\n\
     \n\
     Research synthesis:\n\
     {research_synthesis}\n\
     \n\
     Your task is to create a well-structured answer with the following characteristics:\n\
     1. Clear and engaging introduction that frames the topic\n\
     2. Logically organized body with proper headings and subheadings\n\
     3. Comprehensive coverage of the key aspects of the topic\n\
     4. Evidence-based statements with proper attribution to sources\n\
     5. Balanced presentation of different perspectives where applicable\n\
     6. Thoughtful conclusion that summarizes key insights\n\
     \n\
     Format your answer using markdown for better readability.\n\
     Include citations in the format [Source: URL] where appropriate.\n\
     \n\
     The answer should be comprehensive while being accessible to a general audience.",
);

/// Reviews and improves `{draft}`.
pub const IMPROVEMENT: PromptTemplate = PromptTemplate::new(
    "improvement",
    "You are a professional editor tasked with reviewing and improving a draft answer.\n\
     \n\
     Research topic: {research_topic}\n\
     \n\
     Original draft:\n\
     {draft}\n\
     \n\
     Your task is to review the draft and improve it in the following ways:\n\
     1. Check for factual accuracy and consistency\n\
     2. Improve clarity and readability\n\
     3. Ensure logical flow and organization\n\
     4. Enhance the quality of explanations\n\
     5. Add any missing important information\n\
     6. Remove any redundant or irrelevant information\n\
     7. Ensure proper citation and attribution\n\
     \n\
     Provide the improved version while maintaining the overall structure and format of the original.",
);

/// Produces a fact-check report for `{draft}` against `{research_synthesis}`.
pub const FACT_CHECK: PromptTemplate = PromptTemplate::new(
    "fact_check",
    "You are a professional fact-checker tasked with verifying the accuracy of information\n\
     in a research draft based on the original research findings.\n\
     \n\
     Research topic: {research_topic}\n\
     \n\
     Original research synthesis:\n\
     {research_synthesis}\n\
     \n\
     Draft to verify:\n\
     {draft}\n\
     \n\
     Your task is to:\n\
     1. Identify any factual inaccuracies or unsupported claims in the draft\n\
     2. Assess whether the draft correctly represents the information from the research synthesis\n\
     3. Check for any misleading statements, exaggerations, or oversimplifications\n\
     4. Verify that the citations are used correctly and support the associated claims\n\
     \n\
     For each issue identified, provide:\n\
     - The specific statement or claim that is problematic\n\
     - The nature of the issue (inaccuracy, unsupported claim, misrepresentation, etc.)\n\
     - The correct information based on the research synthesis\n\
     \n\
     Do not flag stylistic issues or matters of opinion - focus only on factual accuracy.\n\
     If no issues are found, state that the draft appears to be factually accurate based on\n\
     the provided research synthesis.\n\
     \n\
     Format your fact-check report using markdown for better readability.",
);

/// Corrects `{draft}` per `{fact_check_report}`.
pub const CORRECTION: PromptTemplate = PromptTemplate::new(
    "correction",
    "You are a professional editor tasked with correcting factual inaccuracies in a research draft.\n\
     \n\
     Research topic: {research_topic}\n\
     \n\
     Original draft:\n\
     {draft}\n\
     \n\
     Fact check report:\n\
     {fact_check_report}\n\
     \n\
     Your task is to:\n\
     1. Carefully review the fact check report\n\
     2. Modify the draft to correct all identified factual inaccuracies\n\
     3. Ensure the corrections maintain the flow and readability of the document\n\
     4. Add appropriate citations for any new factual claims\n\
     5. Preserve the original structure and style of the document\n\
     \n\
     Provide the corrected version of the draft, maintaining the overall format and structure.\n\
     If the fact check report indicates no issues, return the original draft unchanged.",
);

/// Extracts and analyzes the citations in `{draft}`.
pub const CITATION_EXTRACTION: PromptTemplate = PromptTemplate::new(
    "citation_extraction",
    "You are a professional citation analyst tasked with extracting and analyzing all citations\n\
     in a research document.\n\
     \n\
     Research draft:\n\
     {draft}\n\
     \n\
     Your task is to:\n\
     1. Extract all citations and references found in the document\n\
     2. List each source with its associated URL\n\
     3. Note any places where a factual claim is made but lacks a citation\n\
     \n\
     Format your response as a structured list of all sources found, with URLs.\n\
     For each citation, include:\n\
     - The exact citation text as it appears in the document\n\
     - The complete URL\n\
     - The context in which it was used (brief excerpt)\n\
     \n\
     Also separately list any claims that appear to need citation but don't have one.",
);

/// Reformats citations in `{draft}` to `{citation_style}` style.
pub const CITATION_FORMATTING: PromptTemplate = PromptTemplate::new(
    "citation_formatting",
    "You are a professional citation editor tasked with standardizing and improving the citation\n\
     format in a research document.\n\
     \n\
     Research topic: {research_topic}\n\
     \n\
     Original draft:\n\
     {draft}\n\
     \n\
     Citation analysis:\n\
     {citation_analysis}\n\
     \n\
     Your task is to:\n\
     1. Standardize all citations to use {citation_style} format\n\
     2. Add citations for claims that need them, based on the research synthesis\n\
     3. Ensure each citation is properly linked to its source\n\
     4. Add a \"References\" section at the end of the document with a numbered list of all sources\n\
     5. Replace inline citation URLs with reference numbers or standardized in-text citations\n\
     that link to the References section\n\
     \n\
     Research synthesis for reference:\n\
     {research_synthesis}\n\
     \n\
     Provide the complete revised document with properly formatted citations and a References section.\n\
     Maintain the original structure and content of the document while improving the citation format.",
);

/// Validates the citations in `{formatted_draft}`.
pub const CITATION_VALIDATION: PromptTemplate = PromptTemplate::new(
    "citation_validation",
    "You are a citation validator tasked with ensuring the accuracy and validity of sources\n\
     in a research document.\n\
     \n\
     Formatted draft with citations:\n\
     {formatted_draft}\n\
     \n\
     Your task is to:\n\
     1. Verify that all URLs in the References section are properly formatted\n\
     2. Check that all reference numbers in the text correctly link to the References section\n\
     3. Ensure there are no broken or incomplete citations\n\
     4. Confirm that the References section contains all sources cited in the text\n\
     \n\
     Provide a brief validation report. If issues are found, describe them clearly.\n\
     If the validation passes, simply state that all citations appear to be properly formatted.\n\
     \n\
     Then provide the final validated document, with any necessary corrections applied.",
);
