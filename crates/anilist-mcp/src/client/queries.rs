//! GraphQL documents sent to AniList.
//!
//! Documents that share selections reference fragments; [`with_fragments`]
//! appends the fragment definitions before sending.

/// Append fragment definitions to an operation.
pub fn with_fragments(operation: &str, fragments: &[&str]) -> String {
    let mut document = String::from(operation);
    for fragment in fragments {
        document.push('\n');
        document.push_str(fragment);
    }
    document
}

pub const PAGE_INFO: &str = "pageInfo { total perPage currentPage lastPage hasNextPage }";

// Media

pub const MEDIA_FRAGMENT: &str = r"
fragment media on Media {
  id
  idMal
  title { romaji english native userPreferred }
  type
  format
  status(version: 2)
  description(asHtml: false)
  startDate { year month day }
  endDate { year month day }
  countryOfOrigin
  isLicensed
  source(version: 3)
  hashtag
  trailer { id site thumbnail }
  updatedAt
  coverImage { extraLarge large medium color }
  bannerImage
  genres
  synonyms
  averageScore
  meanScore
  popularity
  trending
  favourites
  isFavourite
  isAdult
  siteUrl
  tags { id name description category rank isGeneralSpoiler isMediaSpoiler isAdult }
  studios { nodes { id name isAnimationStudio siteUrl } }
  externalLinks { id url site type language }
  rankings { id rank type format year season allTime context }
  relations { edges { relationType(version: 2) node { id type format title { romaji english } } } }
  characters(sort: [ROLE, RELEVANCE], perPage: 25) {
    edges { role node { id name { full native } } voiceActors(language: JAPANESE) { id name { full } } }
  }
  staff(sort: RELEVANCE, perPage: 25) { edges { role node { id name { full native } } } }
  recommendations(perPage: 10, sort: RATING_DESC) {
    nodes { rating mediaRecommendation { id type title { romaji english } } }
  }
  stats { scoreDistribution { score amount } statusDistribution { status amount } }
}";

pub const ANIME: &str = r"
query ($id: Int) {
  Media(id: $id, type: ANIME) {
    ...media
    episodes
    duration
    season
    seasonYear
    nextAiringEpisode { id airingAt timeUntilAiring episode }
    streamingEpisodes { title thumbnail url site }
  }
}";

pub const MANGA: &str = r"
query ($id: Int) {
  Media(id: $id, type: MANGA) {
    ...media
    chapters
    volumes
  }
}";

/// Media search; the filter's declarations and arguments replace `{decls}` / `{args}`.
pub const MEDIA_SEARCH: &str = r"
query ($search: String, $type: MediaType, $page: Int, $perPage: Int{decls}) {
  Page(page: $page, perPage: $perPage) {
    {page_info}
    media(search: $search, type: $type{args}) {
      id
      idMal
      title { romaji english native }
      type
      format
      status(version: 2)
      episodes
      chapters
      volumes
      season
      seasonYear
      averageScore
      popularity
      genres
      isAdult
      coverImage { medium }
      siteUrl
    }
  }
}";

pub const TOGGLE_FAVOURITE: &str = r"
mutation ($animeId: Int, $mangaId: Int, $characterId: Int, $staffId: Int, $studioId: Int) {
  ToggleFavourite(
    animeId: $animeId
    mangaId: $mangaId
    characterId: $characterId
    staffId: $staffId
    studioId: $studioId
  ) {
    anime(perPage: 50) { nodes { id } }
    manga(perPage: 50) { nodes { id } }
    characters(perPage: 50) { nodes { id } }
    staff(perPage: 50) { nodes { id } }
    studios(perPage: 50) { nodes { id } }
  }
}";

// Activity

pub const ACTIVITY_FRAGMENT: &str = r"
fragment activity on ActivityUnion {
  ... on TextActivity {
    id type text replyCount likeCount isLocked isPinned createdAt siteUrl
    user { id name }
  }
  ... on ListActivity {
    id type status progress replyCount likeCount isLocked isPinned createdAt siteUrl
    user { id name }
    media { id type title { romaji english } }
  }
  ... on MessageActivity {
    id type message isPrivate replyCount likeCount isLocked createdAt siteUrl
    messenger { id name }
    recipient { id name }
  }
}";

pub const ACTIVITY: &str = r"
query ($id: Int) {
  Activity(id: $id) { ...activity }
}";

pub const USER_ACTIVITIES: &str = r"
query ($userId: Int, $page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    {page_info}
    activities(userId: $userId, sort: ID_DESC) { ...activity }
  }
}";

/// Activity search; `{decls}` / `{args}` carry the filter.
pub const ACTIVITY_SEARCH: &str = r"
query ($page: Int, $perPage: Int{decls}) {
  Page(page: $page, perPage: $perPage) {
    {page_info}
    activities(sort: ID_DESC{args}) { ...activity }
  }
}";

pub const DELETE_ACTIVITY: &str = r"
mutation ($id: Int) {
  DeleteActivity(id: $id) { deleted }
}";

pub const SAVE_TEXT_ACTIVITY: &str = r"
mutation ($id: Int, $text: String) {
  SaveTextActivity(id: $id, text: $text) {
    id type text createdAt siteUrl
    user { id name }
  }
}";

pub const SAVE_MESSAGE_ACTIVITY: &str = r"
mutation ($id: Int, $message: String, $recipientId: Int, $private: Boolean) {
  SaveMessageActivity(id: $id, message: $message, recipientId: $recipientId, private: $private) {
    id type message isPrivate createdAt siteUrl
    messenger { id name }
    recipient { id name }
  }
}";

// Lists

pub const LIST_COLLECTION: &str = r"
query ($userId: Int, $userName: String, $type: MediaType) {
  MediaListCollection(userId: $userId, userName: $userName, type: $type) {
    user { id name }
    hasNextChunk
    lists {
      name
      isCustomList
      isSplitCompletedList
      status
      entries {
        id mediaId status score progress progressVolumes repeat priority private notes
        startedAt { year month day }
        completedAt { year month day }
        updatedAt
        media { id type format episodes chapters title { romaji english } }
      }
    }
  }
}";

pub const SAVE_LIST_ENTRY: &str = r"
mutation (
  $id: Int, $mediaId: Int, $status: MediaListStatus, $score: Float, $scoreRaw: Int,
  $progress: Int, $progressVolumes: Int, $repeat: Int, $priority: Int, $private: Boolean,
  $notes: String, $hiddenFromStatusLists: Boolean, $customLists: [String],
  $advancedScores: [Float], $startedAt: FuzzyDateInput, $completedAt: FuzzyDateInput
) {
  SaveMediaListEntry(
    id: $id, mediaId: $mediaId, status: $status, score: $score, scoreRaw: $scoreRaw,
    progress: $progress, progressVolumes: $progressVolumes, repeat: $repeat,
    priority: $priority, private: $private, notes: $notes,
    hiddenFromStatusLists: $hiddenFromStatusLists, customLists: $customLists,
    advancedScores: $advancedScores, startedAt: $startedAt, completedAt: $completedAt
  ) {
    id mediaId status score progress progressVolumes repeat priority private notes
    hiddenFromStatusLists customLists advancedScores
    startedAt { year month day }
    completedAt { year month day }
    updatedAt createdAt
    media { id type title { romaji english } }
  }
}";

pub const DELETE_LIST_ENTRY: &str = r"
mutation ($id: Int) {
  DeleteMediaListEntry(id: $id) { deleted }
}";

// People

pub const CHARACTER: &str = r"
query ($id: Int, $search: String) {
  Character(id: $id, search: $search) {
    id
    name { first middle last full native alternative alternativeSpoiler userPreferred }
    image { large medium }
    description(asHtml: false)
    gender
    dateOfBirth { year month day }
    age
    bloodType
    favourites
    isFavourite
    siteUrl
    media(perPage: 10, sort: POPULARITY_DESC) {
      edges { characterRole node { id type format title { romaji english } } }
    }
  }
}";

pub const STAFF: &str = r"
query ($id: Int, $search: String) {
  Staff(id: $id, search: $search) {
    id
    name { first middle last full native alternative userPreferred }
    languageV2
    image { large medium }
    description(asHtml: false)
    primaryOccupations
    gender
    dateOfBirth { year month day }
    dateOfDeath { year month day }
    age
    yearsActive
    homeTown
    bloodType
    favourites
    isFavourite
    siteUrl
    staffMedia(perPage: 10, sort: POPULARITY_DESC) {
      edges { staffRole node { id type format title { romaji english } } }
    }
    characters(perPage: 10, sort: FAVOURITES_DESC) { nodes { id name { full } } }
  }
}";

pub const BIRTHDAY_CHARACTERS: &str = r"
query ($page: Int) {
  Page(page: $page, perPage: 25) {
    {page_info}
    characters(isBirthday: true, sort: FAVOURITES_DESC) {
      id name { full native } image { medium } dateOfBirth { year month day } favourites siteUrl
    }
  }
}";

pub const BIRTHDAY_STAFF: &str = r"
query ($page: Int) {
  Page(page: $page, perPage: 25) {
    {page_info}
    staff(isBirthday: true, sort: FAVOURITES_DESC) {
      id name { full native } image { medium } dateOfBirth { year month day } favourites siteUrl
    }
  }
}";

// Recommendations

pub const RECOMMENDATION: &str = r"
query ($id: Int) {
  Recommendation(id: $id) {
    id
    rating
    userRating
    media { id type title { romaji english } siteUrl }
    mediaRecommendation { id type title { romaji english } siteUrl }
    user { id name }
  }
}";

pub const MEDIA_RECOMMENDATIONS: &str = r"
query ($mediaId: Int, $page: Int, $perPage: Int) {
  Media(id: $mediaId) {
    id
    title { romaji english }
    recommendations(page: $page, perPage: $perPage, sort: RATING_DESC) {
      {page_info}
      nodes {
        id
        rating
        mediaRecommendation { id type format title { romaji english } siteUrl }
      }
    }
  }
}";

// Search

pub const CHARACTER_SEARCH: &str = r"
query ($search: String, $page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    {page_info}
    characters(search: $search) { id name { full native } image { medium } favourites siteUrl }
  }
}";

pub const STAFF_SEARCH: &str = r"
query ($search: String, $page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    {page_info}
    staff(search: $search) {
      id name { full native } image { medium } primaryOccupations favourites siteUrl
    }
  }
}";

pub const STUDIO_SEARCH: &str = r"
query ($search: String, $page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    {page_info}
    studios(search: $search) { id name isAnimationStudio favourites siteUrl }
  }
}";

pub const USER_SEARCH: &str = r"
query ($search: String, $page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    {page_info}
    users(search: $search) { id name avatar { medium } siteUrl }
  }
}";

// Threads

pub const THREAD: &str = r"
query ($id: Int) {
  Thread(id: $id) {
    id title body(asHtml: false)
    userId replyUserId replyCommentId replyCount viewCount
    isLocked isSticky isSubscribed likeCount isLiked
    repliedAt createdAt updatedAt
    user { id name }
    replyUser { id name }
    categories { id name }
    mediaCategories { id type title { romaji english } }
    siteUrl
  }
}";

pub const THREAD_COMMENTS: &str = r"
query ($threadId: Int, $page: Int, $perPage: Int) {
  Page(page: $page, perPage: $perPage) {
    {page_info}
    threadComments(threadId: $threadId) {
      id userId threadId comment(asHtml: false) likeCount isLiked createdAt updatedAt siteUrl
      user { id name }
      childComments
    }
  }
}";

pub const DELETE_THREAD: &str = r"
mutation ($id: Int) {
  DeleteThread(id: $id) { deleted }
}";

// Users

pub const PROFILE_FRAGMENT: &str = r"
fragment profile on User {
  id
  name
  about(asHtml: false)
  avatar { large medium }
  bannerImage
  isFollowing
  isFollower
  isBlocked
  options { titleLanguage displayAdultContent airingNotifications profileColor }
  mediaListOptions { scoreFormat rowOrder }
  donatorTier
  donatorBadge
  moderatorRoles
  createdAt
  updatedAt
  siteUrl
}";

pub const STATS_FRAGMENT: &str = r"
fragment stats on User {
  statistics {
    anime {
      count meanScore standardDeviation minutesWatched episodesWatched
      genres(limit: 10, sort: COUNT_DESC) { genre count meanScore minutesWatched }
      formats { format count }
      statuses { status count }
      scores(sort: MEAN_SCORE_DESC) { score count }
    }
    manga {
      count meanScore standardDeviation chaptersRead volumesRead
      genres(limit: 10, sort: COUNT_DESC) { genre count meanScore chaptersRead }
      formats { format count }
      statuses { status count }
      scores(sort: MEAN_SCORE_DESC) { score count }
    }
  }
}";

pub const USER_PROFILE: &str = r"
query ($id: Int, $name: String) {
  User(id: $id, name: $name) { ...profile }
}";

pub const USER_STATS: &str = r"
query ($id: Int, $name: String) {
  User(id: $id, name: $name) { id name ...stats }
}";

pub const USER_FULL: &str = r"
query ($id: Int, $name: String) {
  User(id: $id, name: $name) {
    ...profile
    ...stats
    favourites {
      anime(perPage: 25) { nodes { id title { romaji english } siteUrl } }
      manga(perPage: 25) { nodes { id title { romaji english } siteUrl } }
      characters(perPage: 25) { nodes { id name { full } siteUrl } }
      staff(perPage: 25) { nodes { id name { full } siteUrl } }
      studios(perPage: 25) { nodes { id name siteUrl } }
    }
  }
}";

pub const VIEWER: &str = r"
query {
  Viewer {
    ...profile
    unreadNotificationCount
    options { timezone activityMergeTime staffNameLanguage titleLanguage profileColor }
  }
}";

pub const TOGGLE_FOLLOW: &str = r"
mutation ($userId: Int) {
  ToggleFollow(userId: $userId) { id name isFollowing }
}";

pub const UPDATE_USER: &str = r"
mutation (
  $about: String, $titleLanguage: UserTitleLanguage, $displayAdultContent: Boolean,
  $airingNotifications: Boolean, $scoreFormat: ScoreFormat, $rowOrder: String,
  $profileColor: String, $timezone: String, $activityMergeTime: Int,
  $staffNameLanguage: UserStaffNameLanguage, $notificationOptions: [NotificationOptionInput],
  $animeListOptions: MediaListOptionsInput, $mangaListOptions: MediaListOptionsInput
) {
  UpdateUser(
    about: $about, titleLanguage: $titleLanguage, displayAdultContent: $displayAdultContent,
    airingNotifications: $airingNotifications, scoreFormat: $scoreFormat, rowOrder: $rowOrder,
    profileColor: $profileColor, timezone: $timezone, activityMergeTime: $activityMergeTime,
    staffNameLanguage: $staffNameLanguage, notificationOptions: $notificationOptions,
    animeListOptions: $animeListOptions, mangaListOptions: $mangaListOptions
  ) {
    id
    name
    about(asHtml: false)
    options {
      titleLanguage displayAdultContent airingNotifications profileColor timezone
      activityMergeTime staffNameLanguage
      notificationOptions { type enabled }
    }
    mediaListOptions {
      scoreFormat
      rowOrder
      animeList { sectionOrder splitCompletedSectionByFormat customLists advancedScoring advancedScoringEnabled theme }
      mangaList { sectionOrder splitCompletedSectionByFormat customLists advancedScoring advancedScoringEnabled theme }
    }
  }
}";

// Misc

pub const GENRES: &str = "query { GenreCollection }";

pub const MEDIA_TAGS: &str = r"
query {
  MediaTagCollection { id name description category rank isGeneralSpoiler isMediaSpoiler isAdult }
}";

pub const SITE_STATISTICS: &str = r"
query {
  SiteStatistics {
    users(sort: DATE_DESC, perPage: 7) { nodes { date count change } }
    anime(sort: DATE_DESC, perPage: 7) { nodes { date count change } }
    manga(sort: DATE_DESC, perPage: 7) { nodes { date count change } }
    characters(sort: DATE_DESC, perPage: 7) { nodes { date count change } }
    staff(sort: DATE_DESC, perPage: 7) { nodes { date count change } }
    studios(sort: DATE_DESC, perPage: 7) { nodes { date count change } }
    reviews(sort: DATE_DESC, perPage: 7) { nodes { date count change } }
  }
}";

pub const STUDIO: &str = r"
query ($id: Int, $search: String) {
  Studio(id: $id, search: $search) {
    id
    name
    isAnimationStudio
    favourites
    isFavourite
    siteUrl
    media(sort: POPULARITY_DESC, perPage: 25) {
      {page_info}
      nodes { id type format title { romaji english } siteUrl }
    }
  }
}";

/// Substitute the `{page_info}`, `{decls}` and `{args}` placeholders.
pub fn render(template: &str, declarations: &str, arguments: &str) -> String {
    template
        .replace("{page_info}", PAGE_INFO)
        .replace("{decls}", declarations)
        .replace("{args}", arguments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_replaces_placeholders() {
        let doc = render(MEDIA_SEARCH, ", $genre: String", ", genre: $genre");
        assert!(doc.contains("$perPage: Int, $genre: String)"));
        assert!(doc.contains("type: $type, genre: $genre)"));
        assert!(doc.contains("pageInfo { total"));
        assert!(!doc.contains("{decls}") && !doc.contains("{args}"));
        assert!(!doc.contains("{page_info}"));
    }

    #[test]
    fn test_unfiltered_render_is_clean() {
        let doc = render(ACTIVITY_SEARCH, "", "");
        assert!(doc.contains("query ($page: Int, $perPage: Int)"));
        assert!(doc.contains("activities(sort: ID_DESC)"));
    }

    #[test]
    fn test_fragments_appended() {
        let doc = with_fragments(ACTIVITY, &[ACTIVITY_FRAGMENT]);
        assert!(doc.contains("...activity"));
        assert!(doc.contains("fragment activity on ActivityUnion"));
    }
}
