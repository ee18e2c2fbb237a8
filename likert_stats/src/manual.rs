/*!

This is the long-form manual for `likert_stats` and `likertgap`.

## The analysis

1. **Validity.** An answer is valid when it is a finite number above 0 and at most
   the scale maximum (6 by default). Anything else (blank, 0, negative, out of scale)
   is ignored for that question only: the respondent still counts for the other
   questions.
2. **Cohorts.** The tie-adjusted median of the valid answers to the pivot question
   splits the respondents. An answer at or below the median puts the respondent in
   the low cohort, strictly above it in the high cohort. Respondents who did not give
   a valid pivot answer are in neither cohort.
3. **Grouped statistics.** For every question (the pivot included), the tie-adjusted
   median and the number of valid answers are computed for all the respondents, for
   the low cohort and for the high cohort.
4. **Ranks.** The questions are ranked three times, on the overall median and on each
   cohort median. The highest median is rank 1. With the default `standard` mode, tied
   questions share a rank and the next rank skips (1, 1, 3); the `dense` mode does not
   skip (1, 1, 2).
5. **Summary.** The percentage of questions where each cohort has the lower median,
   the percentage where both are equal, the average cohort medians, and the questions
   with the largest median gap and the largest rank gap between the cohorts.

### Tie-adjusted median

With `M` the plain median and `nl`, `ne`, `ng` the number of answers below, equal to
and above `M`, the tie-adjusted median is `M + (ng - nl) / (2 ne)` when `ne > 0`, and
`M` otherwise. For `[2, 2, 3, 3, 4, 4]`, `M = 3`, `nl = ne = ng = 2`: the result is 3.
For `[5, 5, 5, 6, 6]`, `M = 5`, `nl = 0`, `ne = 3`, `ng = 2`: the result is 5.33.

A group with no valid answer has a median of 0, which no answer can take.

## Input formats

The following formats are supported by `likertgap`:
* `columns` a JSON object, one array of answers per question
* `rows` a JSON array, one object per respondent, grouped by course

### `columns`

```json
{
  "question1": [6, 5, 4, 2],
  "question7": [4, 5, 3, "6"]
}
```

Position `i` in every array is the same respondent. Cells may be numbers or numeric
strings; `null` or anything else is a missing answer.

### `rows`

```json
[
  {"term": "Fall", "instructorId": "42", "courseName": "Statics", "number": "201",
   "question1": 5, "question7": 4}
]
```

The course fields (`response`, `term`, `instructorId`, `firstName`, `lastName`,
`subject`, `number`, `section`, `courseId`, `courseName`) describe the course. Records
with the same term, instructor, course name and number form one course, and each
course is analysed separately. Every other field is a question. A field named after
the text of a configured question is stored under that question's key.

## Configuration file

```json
{
  "outputSettings": {"surveyName": "Fall pulse survey"},
  "responseSources": [{"provider": "columns", "filePath": "responses.json"}],
  "questions": [
    {"key": "question7", "text": "Students like me are REPRESENTED in my engineering major/minor.", "pulse": true}
  ],
  "rules": {
    "pivotQuestion": "question7",
    "scaleMax": 6,
    "rankingMode": "standard",
    "tiebreakMode": "questionKey",
    "topDifferences": 2
  }
}
```

All the `rules` fields except `pivotQuestion` are optional. `tiebreakMode` is either
`questionKey` or `questionText`; it controls the listing order of tied questions.

*/
