use super::Language;

/// Practice passage shown by the reader when no text was given.
pub fn sample_text(language: Language) -> &'static str {
    match language {
        Language::En => EN,
        Language::Es => ES,
        Language::Fr => FR,
        Language::De => DE,
        Language::Sv => SV,
    }
}

const EN: &str = "Speed reading is a collection of reading methods which attempt to increase rates of reading without greatly reducing comprehension or retention. Methods include chunking and eliminating subvocalization. The many available speed-reading training programs include books, videos, software, and seminars.

There is little scientific evidence regarding speed reading, and as a result its value is contested. Cognitive neuroscientist Stanislas Dehaene says that claims of reading speeds of above 500 words per minute \"must be viewed with skepticism\" and that above 300 wpm people must start to use things like skimming or scanning which do not qualify as reading.

The average adult reads prose text at 250 to 300 words per minute. While proofreaders tasked with detecting errors read more slowly at 200 wpm. Higher reading speeds are claimed through speed reading programs, some of which are listed here.

This speed reading application helps you practice the technique of presenting one word at a time in a fixed position, allowing your eyes to stay focused while your brain processes each word individually. This method can help reduce subvocalization and improve reading efficiency for certain types of content.";

const ES: &str = "La lectura rápida es una colección de métodos de lectura que intentan aumentar la velocidad de lectura sin reducir considerablemente la comprensión o retención. Los métodos incluyen la agrupación y la eliminación de la subvocalización. Los muchos programas de entrenamiento disponibles incluyen libros, videos, software y seminarios.

Hay poca evidencia científica sobre la lectura rápida, y como resultado su valor es controvertido. El neurocientífico cognitivo Stanislas Dehaene dice que las afirmaciones de velocidades de lectura superiores a 500 palabras por minuto \"deben verse con escepticismo\" y que por encima de 300 ppm las personas deben comenzar a usar cosas como el escaneo que no califican como lectura.

El adulto promedio lee texto en prosa de 250 a 300 palabras por minuto. Mientras que los correctores encargados de detectar errores leen más lentamente a 200 ppm. Se afirman velocidades de lectura más altas a través de programas de lectura rápida.

Esta aplicación de lectura rápida te ayuda a practicar la técnica de presentar una palabra a la vez en una posición fija, permitiendo que tus ojos se mantengan enfocados mientras tu cerebro procesa cada palabra individualmente.";

const FR: &str = "La lecture rapide est un ensemble de méthodes de lecture qui tentent d'augmenter les taux de lecture sans réduire considérablement la compréhension ou la rétention. Les méthodes incluent le regroupement et l'élimination de la sous-vocalisation. Les nombreux programmes d'entraînement disponibles incluent des livres, des vidéos, des logiciels et des séminaires.

Il y a peu de preuves scientifiques concernant la lecture rapide, et par conséquent sa valeur est contestée. Le neuroscientifique cognitif Stanislas Dehaene dit que les affirmations de vitesses de lecture supérieures à 500 mots par minute \"doivent être vues avec scepticisme\" et qu'au-dessus de 300 mpm les gens doivent commencer à utiliser des choses comme le balayage qui ne qualifient pas comme lecture.

L'adulte moyen lit un texte en prose à 250 à 300 mots par minute. Tandis que les correcteurs chargés de détecter les erreurs lisent plus lentement à 200 mpm. Des vitesses de lecture plus élevées sont revendiquées grâce aux programmes de lecture rapide.

Cette application de lecture rapide vous aide à pratiquer la technique de présenter un mot à la fois dans une position fixe, permettant à vos yeux de rester concentrés pendant que votre cerveau traite chaque mot individuellement.";

const DE: &str = "Schnelllesen ist eine Sammlung von Lesemethoden, die versuchen, die Lesegeschwindigkeit zu erhöhen, ohne das Verständnis oder die Behaltensleistung stark zu reduzieren. Zu den Methoden gehören Chunking und die Eliminierung der Subvokalisation. Die vielen verfügbaren Schnelllesetrainingsprogramme umfassen Bücher, Videos, Software und Seminare.

Es gibt wenig wissenschaftliche Belege für das Schnelllesen, und daher ist sein Wert umstritten. Der kognitive Neurowissenschaftler Stanislas Dehaene sagt, dass Behauptungen von Lesegeschwindigkeiten über 500 Wörter pro Minute \"mit Skepsis betrachtet werden müssen\" und dass Menschen über 300 wpm anfangen müssen, Dinge wie Überfliegen zu verwenden, die nicht als Lesen qualifiziert werden.

Der durchschnittliche Erwachsene liest Prosatext mit 250 bis 300 Wörtern pro Minute. Während Korrektoren, die mit der Fehlererkennung beauftragt sind, langsamer mit 200 wpm lesen. Höhere Lesegeschwindigkeiten werden durch Schnellleseprogramme behauptet.

Diese Schnelllese-Anwendung hilft Ihnen, die Technik zu üben, ein Wort nach dem anderen in einer festen Position zu präsentieren, wodurch Ihre Augen fokussiert bleiben können, während Ihr Gehirn jedes Wort einzeln verarbeitet.";

const SV: &str = "Snabbläsning är en samling läsmetoder som försöker öka läshastigheten utan att avsevärt minska förståelsen eller minnesfunktionen. Metoder inkluderar chunking och eliminering av subvokalisering. De många tillgängliga snabbläsningsprogrammen inkluderar böcker, videor, programvara och seminarier.

Det finns lite vetenskapliga bevis angående snabbläsning, och som ett resultat är dess värde omtvistat. Kognitiv neurovetenskapsman Stanislas Dehaene säger att påståenden om läshastigheter över 500 ord per minut \"måste betraktas med skepsis\" och att över 300 opm måste folk börja använda saker som skumläsning som inte kvalificerar som läsning.

Den genomsnittliga vuxna läser prosatext med 250 till 300 ord per minut. Medan korrekturläsare som har till uppgift att upptäcka fel läser långsammare med 200 opm. Högre läshastigheter påstås genom snabbläsningsprogram.

Denna snabbläsningsapplikation hjälper dig att öva tekniken att presentera ett ord i taget i en fast position, vilket gör att dina ögon kan förbli fokuserade medan din hjärna bearbetar varje ord individuellt.";
